//! Compiled multi-channel renderer.
//!
//! A [`Renderer`] binds an ordered list of channel ids to fields once, then fills any
//! compatible [`MultiRaster`] from a source area. Every pixel's source coordinate is
//! computed once and shared by all channels; on interleaved targets the channel writes
//! of one pixel are contiguous.
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::field::{Field, MultiField};
use crate::geometry::Bounds;
use crate::raster::{ChannelId, MultiRaster, RasterLayout};
use crate::render::options::RenderOptions;
use crate::render::progress::{ProgressListener, RenderOutcome};
use crate::render::strided::SourceGrid;

/// An ordered channel list bound to fields, reusable across renders.
#[derive(Clone)]
pub struct Renderer {
    channels: Vec<(ChannelId, Arc<dyn Field>)>,
}

/// One renderer channel resolved against a target.
struct Bound<'a> {
    field: &'a dyn Field,
    layout: RasterLayout,
}

impl Renderer {
    /// Builds a renderer from explicit `(channel id, field)` pairs.
    ///
    /// Fails if the list is empty or repeats an id.
    pub fn new<I, C>(channels: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, Arc<dyn Field>)>,
        C: Into<ChannelId>,
    {
        let channels: Vec<(ChannelId, Arc<dyn Field>)> = channels
            .into_iter()
            .map(|(id, field)| (id.into(), field))
            .collect();
        if channels.is_empty() {
            return Err(Error::InvalidArgument(
                "a renderer needs at least one channel".into(),
            ));
        }
        for (i, (id, _)) in channels.iter().enumerate() {
            if channels[..i].iter().any(|(other, _)| other == id) {
                return Err(Error::InvalidArgument(format!("duplicate channel '{id}'")));
            }
        }
        Ok(Self { channels })
    }

    /// Resolves `channel_ids` against `source`, in the given order.
    pub fn compile<M: MultiField + ?Sized>(source: &M, channel_ids: &[&str]) -> Result<Self> {
        let channels = channel_ids
            .iter()
            .map(|id| {
                source
                    .field(id)
                    .map(|field| (*id, field))
                    .ok_or_else(|| Error::UnknownChannel { id: (*id).into() })
            })
            .collect::<Result<Vec<_>>>()?;
        let renderer = Self::new(channels)?;
        debug!("Compiled renderer for channels {:?}.", channel_ids);
        Ok(renderer)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channel ids in render order.
    pub fn channel_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.channels.iter().map(|(id, _)| id.as_str())
    }

    /// Samples every channel at `(x, y)` into `out`, in render order.
    ///
    /// Extra slots in `out` are left alone; missing slots drop trailing channels.
    pub fn sample_pixel(&self, x: f64, y: f64, sample_size: f64, out: &mut [f32]) {
        for (slot, (_, field)) in out.iter_mut().zip(&self.channels) {
            *slot = field.sample(x, y, sample_size);
        }
    }

    /// Renders `source_area` into every renderer channel of `target`.
    ///
    /// `listener` is polled every [`RenderOptions::DEFAULT_PROGRESS_INTERVAL_ROWS`] rows.
    pub fn render_to_raster(
        &self,
        target: &mut MultiRaster,
        source_area: &dyn Bounds,
        listener: Option<&mut dyn ProgressListener>,
    ) -> Result<RenderOutcome> {
        self.render_with_options(target, source_area, listener, &RenderOptions::default())
    }

    /// [`Renderer::render_to_raster`] with explicit options.
    ///
    /// Target channels the renderer does not know are left untouched. A cancelled render
    /// keeps the rows written so far.
    pub fn render_with_options(
        &self,
        target: &mut MultiRaster,
        source_area: &dyn Bounds,
        mut listener: Option<&mut dyn ProgressListener>,
        options: &RenderOptions,
    ) -> Result<RenderOutcome> {
        options.validate()?;
        let bound = self.bind(target)?;
        let (size_x, size_y) = target.size();
        let grid = SourceGrid::for_area(source_area, size_x, size_y)?;
        debug!(
            "Rendering {} channel(s) into a {}x{} raster.",
            bound.len(),
            size_x,
            size_y
        );

        let data = target.data_mut();
        for y in 0..size_y {
            render_pixel_row(&bound, data, 0, &grid, size_x, y);

            let rows_done = y + 1;
            if let Some(listener) = listener.as_deref_mut() {
                if options.poll_due(rows_done) {
                    let fraction = rows_done as f32 / size_y as f32;
                    trace!("Render progress {:.3}.", fraction);
                    if !listener.on_progress(fraction) && rows_done < size_y {
                        info!("Render cancelled after {} of {} rows.", rows_done, size_y);
                        return Ok(RenderOutcome::Cancelled {
                            rows_rendered: rows_done,
                        });
                    }
                }
            }
        }
        debug!("Render finished.");
        Ok(RenderOutcome::Completed)
    }

    /// Parallel render without progress reporting.
    ///
    /// Rows are rendered concurrently when every channel stays within its own row span,
    /// as on interleaved targets. Other layouts fall back to the sequential loop.
    #[cfg(feature = "parallel")]
    pub fn render_to_raster_par(
        &self,
        target: &mut MultiRaster,
        source_area: &dyn Bounds,
    ) -> Result<()> {
        let bound = self.bind(target)?;
        let (size_x, size_y) = target.size();
        let grid = SourceGrid::for_area(source_area, size_x, size_y)?;

        let Some(row_stride) = row_disjoint_stride(&bound, size_x) else {
            tracing::warn!("Channel layouts overlap across rows; rendering sequentially.");
            self.render_to_raster(target, source_area, None)?;
            return Ok(());
        };
        debug!(
            "Rendering {} channel(s) into a {}x{} raster in parallel.",
            bound.len(),
            size_x,
            size_y
        );
        target
            .data_mut()
            .par_chunks_mut(row_stride)
            .take(size_y)
            .enumerate()
            .for_each(|(y, row)| render_pixel_row(&bound, row, y * row_stride, &grid, size_x, y));
        Ok(())
    }

    fn bind(&self, target: &MultiRaster) -> Result<Vec<Bound<'_>>> {
        self.channels
            .iter()
            .map(|(id, field)| {
                let layout = target.channel_layout(id).ok_or_else(|| {
                    Error::IncompatibleTarget(format!("target has no channel '{id}'"))
                })?;
                Ok(Bound {
                    field: field.as_ref(),
                    layout,
                })
            })
            .collect()
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("channels", &self.channel_ids().collect::<Vec<_>>())
            .finish()
    }
}

/// Writes row `y` of every bound channel. `data[0]` is buffer index `base`.
#[inline]
fn render_pixel_row(
    bound: &[Bound<'_>],
    data: &mut [f32],
    base: usize,
    grid: &SourceGrid,
    size_x: usize,
    y: usize,
) {
    let sy = grid.row_y(y);
    let mut sx = grid.start.x;
    for x in 0..size_x {
        for channel in bound {
            data[channel.layout.index(x, y) - base] = channel.field.sample(sx, sy, grid.sample_size);
        }
        sx += grid.step.x;
    }
}

/// Common row stride if every channel's row `y` lies inside `[y * stride, (y + 1) * stride)`.
#[cfg(feature = "parallel")]
fn row_disjoint_stride(bound: &[Bound<'_>], size_x: usize) -> Option<usize> {
    let stride = bound.first()?.layout.row_stride();
    bound
        .iter()
        .all(|b| {
            b.layout.row_stride() == stride
                && b.layout.offset + (size_x - 1) * b.layout.x_step < stride
        })
        .then_some(stride)
}
