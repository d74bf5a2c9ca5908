//! Multi-channel rasters sharing one backing buffer.
//!
//! Every channel of a [`MultiRaster`] is a [`RasterLayout`] into the same `Vec<f32>`.
//! With [`ChannelLayout::Interleaved`] channel `i` of `n` uses offset `i` and x-step `n`,
//! so all values of one pixel are contiguous. With [`ChannelLayout::Planar`] each channel
//! occupies its own dense block. The channel set is fixed at construction.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::grid::Raster;
use super::layout::RasterLayout;
use super::ChannelId;
use crate::error::{Error, Result};

/// How channels are arranged inside the shared buffer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// All channel values of a pixel are adjacent.
    Interleaved,
    /// Each channel is a separate dense block.
    Planar,
}

/// A fixed set of equally sized channels over one buffer.
#[derive(Clone, Debug)]
pub struct MultiRaster {
    data: Vec<f32>,
    size_x: usize,
    size_y: usize,
    channels: Vec<(ChannelId, RasterLayout)>,
    arrangement: Option<ChannelLayout>,
}

impl MultiRaster {
    /// Allocates a zeroed raster with interleaved channels.
    pub fn interleaved<I, C>(size_x: usize, size_y: usize, channel_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<ChannelId>,
    {
        Self::with_layout(size_x, size_y, channel_ids, ChannelLayout::Interleaved)
    }

    /// Allocates a zeroed raster with planar channels.
    pub fn planar<I, C>(size_x: usize, size_y: usize, channel_ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<ChannelId>,
    {
        Self::with_layout(size_x, size_y, channel_ids, ChannelLayout::Planar)
    }

    /// Allocates a zeroed raster with the given channel arrangement.
    pub fn with_layout<I, C>(
        size_x: usize,
        size_y: usize,
        channel_ids: I,
        arrangement: ChannelLayout,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<ChannelId>,
    {
        let ids: Vec<ChannelId> = channel_ids.into_iter().map(Into::into).collect();
        let n = ids.len();
        let plane = RasterLayout::planar(size_x, size_y)?;
        let total = plane.len().checked_mul(n).ok_or_else(|| {
            Error::InvalidLayout(format!(
                "{n} channels of {size_x}x{size_y} overflow usize addressing"
            ))
        })?;

        let channels = ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let layout = match arrangement {
                    ChannelLayout::Interleaved => RasterLayout {
                        offset: i,
                        x_step: n,
                        ..plane
                    },
                    ChannelLayout::Planar => RasterLayout {
                        offset: i * plane.len(),
                        ..plane
                    },
                };
                (id, layout)
            })
            .collect();

        let mut raster = Self::from_parts(vec![0.0; total], channels)?;
        raster.arrangement = Some(arrangement);
        Ok(raster)
    }

    /// Wraps a buffer with caller-defined channel layouts.
    ///
    /// Fails if there are no channels, if ids repeat, if channels disagree on size or if
    /// any layout would address past the end of `data`. Overlapping layouts are allowed.
    pub fn from_parts(data: Vec<f32>, channels: Vec<(ChannelId, RasterLayout)>) -> Result<Self> {
        let Some((_, first)) = channels.first() else {
            return Err(Error::InvalidArgument(
                "a multi-raster needs at least one channel".into(),
            ));
        };
        let (size_x, size_y) = (first.size_x, first.size_y);

        for (i, (id, layout)) in channels.iter().enumerate() {
            if layout.size_x != size_x || layout.size_y != size_y {
                return Err(Error::InvalidLayout(format!(
                    "channel '{id}' is {}x{} but the raster is {size_x}x{size_y}",
                    layout.size_x, layout.size_y
                )));
            }
            if channels[..i].iter().any(|(other, _)| other == id) {
                return Err(Error::InvalidArgument(format!(
                    "duplicate channel '{id}'"
                )));
            }
            layout.validate(data.len())?;
        }

        Ok(Self {
            data,
            size_x,
            size_y,
            channels,
            arrangement: None,
        })
    }

    /// The arrangement used at construction, `None` for custom layouts.
    pub fn arrangement(&self) -> Option<ChannelLayout> {
        self.arrangement
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    /// `(size_x, size_y)`.
    pub fn size(&self) -> (usize, usize) {
        (self.size_x, self.size_y)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Channel ids in construction order.
    pub fn channel_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.channels.iter().map(|(id, _)| id.as_str())
    }

    pub fn has_channel(&self, id: &str) -> bool {
        self.channel_index(id).is_some()
    }

    /// Layout of a channel inside [`MultiRaster::data`].
    pub fn channel_layout(&self, id: &str) -> Option<RasterLayout> {
        self.channel_index(id).map(|i| self.channels[i].1)
    }

    /// Read-only view of one channel.
    pub fn channel(&self, id: &str) -> Option<Raster<&[f32]>> {
        let layout = self.channel_layout(id)?;
        Some(Raster::from_validated(self.data.as_slice(), layout))
    }

    /// Mutable view of one channel.
    pub fn channel_mut(&mut self, id: &str) -> Option<Raster<&mut [f32]>> {
        let layout = self.channel_layout(id)?;
        Some(Raster::from_validated(self.data.as_mut_slice(), layout))
    }

    /// Reads all channel values of pixel `(x, y)` into `out`, in channel order.
    pub fn pixel(&self, x: usize, y: usize, out: &mut [f32]) -> Result<()> {
        if x >= self.size_x || y >= self.size_y {
            return Err(Error::OutOfBounds {
                x,
                y,
                size_x: self.size_x,
                size_y: self.size_y,
            });
        }
        if out.len() < self.channels.len() {
            return Err(Error::InvalidArgument(format!(
                "output holds {} values but the raster has {} channels",
                out.len(),
                self.channels.len()
            )));
        }
        for (slot, (_, layout)) in out.iter_mut().zip(&self.channels) {
            *slot = self.data[layout.index(x, y)];
        }
        Ok(())
    }

    /// The shared backing buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    pub(crate) fn channel_index(&self, id: &str) -> Option<usize> {
        self.channels.iter().position(|(c, _)| c == id)
    }

    pub(crate) fn channel_layouts(&self) -> impl Iterator<Item = &(ChannelId, RasterLayout)> {
        self.channels.iter()
    }
}
