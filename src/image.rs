//! Decoded images and what a writer accepts.

use alloc::vec::Vec;

use crate::error::{IioError, IioResult};
use crate::layout::PixelLayout;
use crate::palette::Palette;
use crate::raster::Raster;
use crate::standard::StandardLayout;

/// A raster interpreted through a [`PixelLayout`].
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBuffer {
    layout: PixelLayout,
    raster: Raster,
    standard: Option<StandardLayout>,
}

impl ImageBuffer {
    /// Pair a layout with a raster.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if the raster's sample model is not the
    /// one `layout` prescribes for the raster's size.
    pub fn new(layout: PixelLayout, raster: Raster) -> IioResult<Self> {
        let expected = layout.sample_model(raster.width(), raster.height())?;
        if &expected != raster.sample_model() {
            return Err(IioError::invalid_argument(
                "raster is incompatible with layout",
            ));
        }
        let standard = layout.standard_layout();
        Ok(Self::from_parts(layout, raster, standard))
    }

    pub(crate) fn from_parts(
        layout: PixelLayout,
        raster: Raster,
        standard: Option<StandardLayout>,
    ) -> Self {
        Self {
            layout,
            raster,
            standard,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn layout(&self) -> &PixelLayout {
        &self.layout
    }

    /// The standard layout this image uses, if any.
    pub fn standard_layout(&self) -> Option<StandardLayout> {
        self.standard
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.layout.palette()
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }

    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

/// Pixels handed to a writer: either a fully interpreted image or bare
/// samples with no color interpretation.
#[derive(Clone, Debug, PartialEq)]
pub enum PixelSource {
    Rendered(ImageBuffer),
    RawSamples(Raster),
}

impl PixelSource {
    pub fn width(&self) -> u32 {
        match self {
            Self::Rendered(image) => image.width(),
            Self::RawSamples(raster) => raster.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Rendered(image) => image.height(),
            Self::RawSamples(raster) => raster.height(),
        }
    }

    /// Samples of either kind of source.
    pub fn raster(&self) -> &Raster {
        match self {
            Self::Rendered(image) => image.raster(),
            Self::RawSamples(raster) => raster,
        }
    }

    /// Layout of a rendered source; raw samples have none.
    pub fn layout(&self) -> Option<&PixelLayout> {
        match self {
            Self::Rendered(image) => Some(image.layout()),
            Self::RawSamples(_) => None,
        }
    }

    #[inline]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::RawSamples(_))
    }
}

impl From<ImageBuffer> for PixelSource {
    fn from(image: ImageBuffer) -> Self {
        Self::Rendered(image)
    }
}

impl From<Raster> for PixelSource {
    fn from(raster: Raster) -> Self {
        Self::RawSamples(raster)
    }
}

/// One image to be written, with optional thumbnails.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFrame {
    pub source: PixelSource,
    pub thumbnails: Vec<ImageBuffer>,
}

impl ImageFrame {
    pub fn new(source: impl Into<PixelSource>) -> Self {
        Self {
            source: source.into(),
            thumbnails: Vec::new(),
        }
    }

    pub fn with_thumbnails(mut self, thumbnails: Vec<ImageBuffer>) -> Self {
        self.thumbnails = thumbnails;
        self
    }
}
