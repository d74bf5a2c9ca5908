//! Multi-channel fields.
//!
//! A [`MultiField`] resolves channel ids to [`Field`]s. [`FieldSet`] is a registry of
//! independent fields; [`RasterMultiField`] exposes every channel of a shared
//! [`MultiRaster`].
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, Result};
use crate::field::raster::RasterChannelField;
use crate::field::Field;
use crate::geometry::{Bounds, Rectangle};
use crate::raster::{ChannelId, MultiRaster};
use crate::render::Renderer;

/// Fields addressed by channel id.
pub trait MultiField: Send + Sync {
    /// Available channel ids.
    fn channel_ids(&self) -> Vec<ChannelId>;

    /// The field behind `id`, if any.
    fn field(&self, id: &str) -> Option<Arc<dyn Field>>;

    fn has_channel(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    /// Samples `channel_ids` at one point into `out`, in the given order.
    fn sample_pixel(
        &self,
        channel_ids: &[&str],
        x: f64,
        y: f64,
        sample_size: f64,
        out: &mut [f32],
    ) -> Result<()> {
        if out.len() < channel_ids.len() {
            return Err(Error::InvalidArgument(format!(
                "output holds {} values but {} channels were requested",
                out.len(),
                channel_ids.len()
            )));
        }
        for (slot, id) in out.iter_mut().zip(channel_ids) {
            let field = self
                .field(id)
                .ok_or_else(|| Error::UnknownChannel { id: (*id).into() })?;
            *slot = field.sample(x, y, sample_size);
        }
        Ok(())
    }

    /// Compiles a reusable renderer for `channel_ids`, in that order.
    fn create_renderer(&self, channel_ids: &[&str]) -> Result<Renderer> {
        Renderer::compile(self, channel_ids)
    }
}

/// A registry of fields keyed by channel id, in insertion order.
#[derive(Clone, Default)]
pub struct FieldSet {
    fields: Vec<(ChannelId, Arc<dyn Field>)>,
}

impl FieldSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Registers `field` under `id`, replacing any previous field with that id.
    pub fn register<F: Field + 'static>(&mut self, id: impl Into<ChannelId>, field: F) {
        self.register_arc(id, Arc::new(field));
    }

    /// Registers an already shared field.
    pub fn register_arc(&mut self, id: impl Into<ChannelId>, field: Arc<dyn Field>) {
        let id = id.into();
        if let Some(slot) = self.fields.iter_mut().find(|(c, _)| *c == id) {
            warn!("Replacing field for channel '{}'.", id);
            slot.1 = field;
        } else {
            self.fields.push((id, field));
        }
    }

    /// Builder form of [`FieldSet::register`].
    pub fn with<F: Field + 'static>(mut self, id: impl Into<ChannelId>, field: F) -> Self {
        self.register(id, field);
        self
    }

    /// Removes and returns the field behind `id`.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn Field>> {
        let i = self.fields.iter().position(|(c, _)| c == id)?;
        Some(self.fields.remove(i).1)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Field>> {
        self.fields.iter().find(|(c, _)| c == id).map(|(_, f)| f)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl MultiField for FieldSet {
    fn channel_ids(&self) -> Vec<ChannelId> {
        self.fields.iter().map(|(id, _)| id.clone()).collect()
    }

    fn field(&self, id: &str) -> Option<Arc<dyn Field>> {
        self.get(id).cloned()
    }

    fn has_channel(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSet")
            .field("channels", &self.channel_ids())
            .finish()
    }
}

/// Every channel of a shared [`MultiRaster`], stretched over one domain rectangle.
#[derive(Clone, Debug)]
pub struct RasterMultiField {
    source: Arc<MultiRaster>,
    domain: Rectangle,
}

impl RasterMultiField {
    /// Fails with [`Error::EmptyArea`] for an empty domain.
    pub fn new(source: Arc<MultiRaster>, domain: &dyn Bounds) -> Result<Self> {
        if domain.is_empty() {
            return Err(Error::EmptyArea);
        }
        Ok(Self {
            source,
            domain: domain.to_rectangle(),
        })
    }

    pub fn source(&self) -> &Arc<MultiRaster> {
        &self.source
    }

    pub fn domain(&self) -> &Rectangle {
        &self.domain
    }
}

impl MultiField for RasterMultiField {
    fn channel_ids(&self) -> Vec<ChannelId> {
        self.source.channel_ids().map(Into::into).collect()
    }

    fn field(&self, id: &str) -> Option<Arc<dyn Field>> {
        RasterChannelField::new(self.source.clone(), id, &self.domain)
            .ok()
            .map(|f| Arc::new(f) as Arc<dyn Field>)
    }

    fn has_channel(&self, id: &str) -> bool {
        self.source.has_channel(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ConstantField, FnField};

    #[test]
    fn register_replaces_and_keeps_order() {
        let mut set = FieldSet::new()
            .with("a", ConstantField::new(1.0))
            .with("b", ConstantField::new(2.0));
        set.register("a", ConstantField::new(3.0));
        assert_eq!(set.len(), 2);
        assert_eq!(set.channel_ids(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(set.field("a").unwrap().sample(0.0, 0.0, 0.0), 3.0);

        assert!(set.unregister("a").is_some());
        assert!(!set.has_channel("a"));
        assert!(set.unregister("a").is_none());
    }

    #[test]
    fn sample_pixel_gathers_in_request_order() {
        let set = FieldSet::new()
            .with("x", FnField::new(|x, _, _| x as f32))
            .with("y", FnField::new(|_, y, _| y as f32));
        let mut out = [0.0; 2];
        set.sample_pixel(&["y", "x"], 2.0, 5.0, 0.0, &mut out).unwrap();
        assert_eq!(out, [5.0, 2.0]);

        assert!(matches!(
            set.sample_pixel(&["z"], 0.0, 0.0, 0.0, &mut out),
            Err(Error::UnknownChannel { .. })
        ));
        assert!(set.sample_pixel(&["x", "y"], 0.0, 0.0, 0.0, &mut out[..1]).is_err());
    }

    #[test]
    fn raster_multi_field_exposes_channels() {
        let mut raster = MultiRaster::planar(2, 2, ["h", "m"]).unwrap();
        raster.channel_mut("h").unwrap().fill(4.0);
        let field = RasterMultiField::new(Arc::new(raster), &Rectangle::from_size(10.0, 10.0)).unwrap();

        assert_eq!(field.channel_ids(), vec!["h".to_string(), "m".to_string()]);
        assert_eq!(field.field("h").unwrap().sample(5.0, 5.0, 1.0), 4.0);
        assert!(field.field("q").is_none());
        assert!(field.create_renderer(&["m", "h"]).is_ok());
    }

    #[test]
    fn raster_multi_field_round_trips_through_renderer() {
        // value = x + 3 * y
        let mut source = MultiRaster::interleaved(3, 3, ["v"]).unwrap();
        for (i, cell) in source.data_mut().iter_mut().enumerate() {
            *cell = i as f32;
        }
        let field = RasterMultiField::new(Arc::new(source), &Rectangle::UNIT).unwrap();
        let renderer = field.create_renderer(&["v"]).unwrap();
        let mut target = MultiRaster::planar(3, 3, ["v"]).unwrap();
        renderer
            .render_to_raster(&mut target, &Rectangle::UNIT, None)
            .unwrap();
        // One-cell footprint: the centre averages a symmetric ramp, the corner clamps.
        let got = target.channel("v").unwrap().to_vec();
        assert_eq!(got[4], 4.0);
        assert!((got[0] - 4.0 / 3.0).abs() < 1e-6);
    }
}
