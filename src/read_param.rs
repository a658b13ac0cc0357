//! Parameters for a single read.

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use crate::bands::validate_band_subset;
use crate::capabilities::CodecCapabilities;
use crate::error::{IioError, IioResult};
use crate::geometry::Dimension;
use crate::image::ImageBuffer;
use crate::mode::require_capability;
use crate::param::IioParam;

static NO_CAPABILITIES: CodecCapabilities = CodecCapabilities::new();

/// How a reader should decode one image.
///
/// Dereferences to [`IioParam`] for the settings shared with writers.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageReadParam {
    common: IioParam,
    caps: &'static CodecCapabilities,
    source_render_size: Option<Dimension>,
    destination: Option<ImageBuffer>,
    destination_bands: Option<Vec<u32>>,
    min_progressive_pass: u32,
    num_progressive_passes: u32,
}

impl Default for ImageReadParam {
    fn default() -> Self {
        Self::new(&NO_CAPABILITIES)
    }
}

impl Deref for ImageReadParam {
    type Target = IioParam;

    fn deref(&self) -> &IioParam {
        &self.common
    }
}

impl DerefMut for ImageReadParam {
    fn deref_mut(&mut self) -> &mut IioParam {
        &mut self.common
    }
}

impl ImageReadParam {
    /// Defaults for a reader with the given capabilities.
    pub fn new(caps: &'static CodecCapabilities) -> Self {
        Self {
            common: IioParam::new(),
            caps,
            source_render_size: None,
            destination: None,
            destination_bands: None,
            min_progressive_pass: 0,
            num_progressive_passes: u32::MAX,
        }
    }

    pub fn capabilities(&self) -> &'static CodecCapabilities {
        self.caps
    }

    pub fn can_set_source_render_size(&self) -> bool {
        self.caps.source_render_size()
    }

    /// Ask the reader to render the source at `size` before any region or
    /// subsampling applies.
    ///
    /// # Errors
    ///
    /// [`IioError::UnsupportedOperation`] unless the reader can render at
    /// arbitrary sizes; [`IioError::InvalidArgument`] for a zero dimension.
    pub fn set_source_render_size(&mut self, size: Option<Dimension>) -> IioResult<()> {
        require_capability(
            self.caps.source_render_size(),
            "Can't set source render size!",
        )?;
        if size.is_some_and(|d| d.width == 0 || d.height == 0) {
            return Err(IioError::invalid_argument("width or height <= 0!"));
        }
        self.source_render_size = size;
        Ok(())
    }

    pub fn source_render_size(&self) -> Option<Dimension> {
        self.source_render_size
    }

    /// Decode into `image` instead of a freshly allocated buffer.
    pub fn set_destination(&mut self, image: Option<ImageBuffer>) {
        self.destination = image;
    }

    pub fn destination(&self) -> Option<&ImageBuffer> {
        self.destination.as_ref()
    }

    pub fn destination_mut(&mut self) -> Option<&mut ImageBuffer> {
        self.destination.as_mut()
    }

    /// Remove and return the destination image.
    pub fn take_destination(&mut self) -> Option<ImageBuffer> {
        self.destination.take()
    }

    /// Select which destination bands receive the source bands.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if an index repeats.
    pub fn set_destination_bands(&mut self, bands: Option<&[u32]>) -> IioResult<()> {
        if let Some(b) = bands {
            validate_band_subset(b)?;
        }
        self.destination_bands = bands.map(<[u32]>::to_vec);
        Ok(())
    }

    pub fn destination_bands(&self) -> Option<&[u32]> {
        self.destination_bands.as_deref()
    }

    /// Limit decoding to `num_passes` progressive passes from `min_pass`.
    /// `u32::MAX` passes means "all remaining".
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `num_passes` is zero or the last
    /// pass would not fit in a `u32`.
    pub fn set_source_progressive_passes(&mut self, min_pass: u32, num_passes: u32) -> IioResult<()> {
        if num_passes == 0 {
            return Err(IioError::invalid_argument("numPasses <= 0!"));
        }
        if num_passes != u32::MAX && min_pass.checked_add(num_passes - 1).is_none() {
            return Err(IioError::invalid_argument(
                "minPass + numPasses - 1 > u32::MAX!",
            ));
        }
        self.min_progressive_pass = min_pass;
        self.num_progressive_passes = num_passes;
        Ok(())
    }

    pub fn source_min_progressive_pass(&self) -> u32 {
        self.min_progressive_pass
    }

    pub fn source_num_progressive_passes(&self) -> u32 {
        self.num_progressive_passes
    }

    /// Last pass to decode, `u32::MAX` when unbounded.
    pub fn source_max_progressive_pass(&self) -> u32 {
        if self.num_progressive_passes == u32::MAX {
            u32::MAX
        } else {
            self.min_progressive_pass + self.num_progressive_passes - 1
        }
    }
}
