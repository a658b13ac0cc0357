//! Parameters for a single write.
//!
//! Tiling, progressive output and compression each have a [`ParamMode`].
//! Their detail setters only work in [`ParamMode::Explicit`], and only when
//! the writer's [`CodecCapabilities`] advertise the feature.

use core::ops::{Deref, DerefMut};

use crate::capabilities::{CodecCapabilities, CompressionScheme, TileSizeRange};
use crate::error::{IioError, IioResult};
use crate::mode::{ParamMode, assert_mode, require_capability};
use crate::param::IioParam;

static NO_CAPABILITIES: CodecCapabilities = CodecCapabilities::new();

const TILES_UNSUPPORTED: &str = "Tiling not supported!";
const PROGRESSIVE_UNSUPPORTED: &str = "Progressive output not supported";
const COMPRESSION_UNSUPPORTED: &str = "Compression not supported.";

/// Explicit tile size and grid origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileGrid {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

/// How a writer should encode one image.
///
/// Dereferences to [`IioParam`] for the settings shared with readers.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageWriteParam {
    common: IioParam,
    caps: &'static CodecCapabilities,
    tiling_mode: ParamMode,
    tiling: Option<TileGrid>,
    progressive_mode: ParamMode,
    compression_mode: ParamMode,
    compression_type: Option<&'static CompressionScheme>,
    compression_quality: f32,
}

impl Default for ImageWriteParam {
    fn default() -> Self {
        Self::new(&NO_CAPABILITIES)
    }
}

impl Deref for ImageWriteParam {
    type Target = IioParam;

    fn deref(&self) -> &IioParam {
        &self.common
    }
}

impl DerefMut for ImageWriteParam {
    fn deref_mut(&mut self) -> &mut IioParam {
        &mut self.common
    }
}

impl ImageWriteParam {
    /// Defaults for a writer with the given capabilities. Every mode starts
    /// at [`ParamMode::CopyFromMetadata`].
    pub fn new(caps: &'static CodecCapabilities) -> Self {
        Self {
            common: IioParam::new(),
            caps,
            tiling_mode: ParamMode::CopyFromMetadata,
            tiling: None,
            progressive_mode: ParamMode::CopyFromMetadata,
            compression_mode: ParamMode::CopyFromMetadata,
            compression_type: None,
            compression_quality: 1.0,
        }
    }

    pub fn capabilities(&self) -> &'static CodecCapabilities {
        self.caps
    }

    // -----------------------------------------------------------------------
    // Tiling
    // -----------------------------------------------------------------------

    /// Switching to [`ParamMode::Explicit`] clears any previous tile grid.
    pub fn set_tiling_mode(&mut self, mode: ParamMode) -> IioResult<()> {
        require_capability(self.caps.write_tiles(), TILES_UNSUPPORTED)?;
        self.tiling_mode = mode;
        if mode == ParamMode::Explicit {
            self.tiling = None;
        }
        Ok(())
    }

    pub fn tiling_mode(&self) -> IioResult<ParamMode> {
        require_capability(self.caps.write_tiles(), TILES_UNSUPPORTED)?;
        Ok(self.tiling_mode)
    }

    pub fn preferred_tile_sizes(&self) -> IioResult<&'static [TileSizeRange]> {
        require_capability(self.caps.write_tiles(), TILES_UNSUPPORTED)?;
        Ok(self.caps.preferred_tile_sizes())
    }

    /// Set the tile size and grid origin.
    ///
    /// # Errors
    ///
    /// - [`IioError::UnsupportedOperation`] if the writer cannot tile, or
    ///   cannot offset tiles and an offset is non-zero.
    /// - [`IioError::InvalidState`] unless the tiling mode is explicit.
    /// - [`IioError::InvalidArgument`] for a zero size, or a size outside
    ///   every preferred range.
    pub fn set_tiling(&mut self, width: u32, height: u32, x_offset: i32, y_offset: i32) -> IioResult<()> {
        self.tiling_guard()?;
        if (x_offset != 0 || y_offset != 0) && !self.caps.offset_tiles() {
            return Err(IioError::unsupported("Can't offset tiles!"));
        }
        if width == 0 || height == 0 {
            return Err(IioError::invalid_argument("tile dimensions are non-positive!"));
        }
        let ranges = self.caps.preferred_tile_sizes();
        if !ranges.is_empty() && !ranges.iter().any(|r| r.contains(width, height)) {
            return Err(IioError::invalid_argument("Illegal tile size!"));
        }
        self.tiling = Some(TileGrid {
            width,
            height,
            x_offset,
            y_offset,
        });
        Ok(())
    }

    pub fn unset_tiling(&mut self) -> IioResult<()> {
        self.tiling_guard()?;
        self.tiling = None;
        Ok(())
    }

    /// The explicit tile grid.
    ///
    /// # Errors
    ///
    /// [`IioError::UnsupportedOperation`] if the writer cannot tile;
    /// [`IioError::InvalidState`] outside explicit mode or before
    /// [`set_tiling`](Self::set_tiling).
    pub fn tiling(&self) -> IioResult<TileGrid> {
        self.tiling_guard()?;
        self.tiling
            .ok_or_else(|| IioError::invalid_state("Tiling parameters not set!"))
    }

    pub fn tile_width(&self) -> IioResult<u32> {
        self.tiling().map(|t| t.width)
    }

    pub fn tile_height(&self) -> IioResult<u32> {
        self.tiling().map(|t| t.height)
    }

    pub fn tile_grid_x_offset(&self) -> IioResult<i32> {
        self.tiling().map(|t| t.x_offset)
    }

    pub fn tile_grid_y_offset(&self) -> IioResult<i32> {
        self.tiling().map(|t| t.y_offset)
    }

    fn tiling_guard(&self) -> IioResult<()> {
        require_capability(self.caps.write_tiles(), TILES_UNSUPPORTED)?;
        assert_mode(self.tiling_mode, ParamMode::Explicit, "tiling")
    }

    // -----------------------------------------------------------------------
    // Progressive
    // -----------------------------------------------------------------------

    /// Progressive output has no explicit settings, so
    /// [`ParamMode::Explicit`] is rejected.
    pub fn set_progressive_mode(&mut self, mode: ParamMode) -> IioResult<()> {
        require_capability(self.caps.write_progressive(), PROGRESSIVE_UNSUPPORTED)?;
        if mode == ParamMode::Explicit {
            return Err(IioError::invalid_argument(
                "explicit mode not supported for progressive output",
            ));
        }
        self.progressive_mode = mode;
        Ok(())
    }

    pub fn progressive_mode(&self) -> IioResult<ParamMode> {
        require_capability(self.caps.write_progressive(), PROGRESSIVE_UNSUPPORTED)?;
        Ok(self.progressive_mode)
    }

    // -----------------------------------------------------------------------
    // Compression
    // -----------------------------------------------------------------------

    /// Switching to [`ParamMode::Explicit`] clears the scheme and resets
    /// quality to `1.0`.
    pub fn set_compression_mode(&mut self, mode: ParamMode) -> IioResult<()> {
        require_capability(self.caps.write_compressed(), COMPRESSION_UNSUPPORTED)?;
        self.compression_mode = mode;
        if mode == ParamMode::Explicit {
            self.reset_compression();
        }
        Ok(())
    }

    pub fn compression_mode(&self) -> IioResult<ParamMode> {
        require_capability(self.caps.write_compressed(), COMPRESSION_UNSUPPORTED)?;
        Ok(self.compression_mode)
    }

    /// Schemes the writer offers; empty if it has no named schemes.
    pub fn compression_types(&self) -> IioResult<&'static [CompressionScheme]> {
        require_capability(self.caps.write_compressed(), COMPRESSION_UNSUPPORTED)?;
        Ok(self.caps.compression_schemes())
    }

    /// Choose a scheme by name (ASCII case-insensitive), or clear it.
    ///
    /// # Errors
    ///
    /// - [`IioError::UnsupportedOperation`] if the writer cannot compress or
    ///   offers no named schemes.
    /// - [`IioError::InvalidState`] unless the compression mode is explicit.
    /// - [`IioError::InvalidArgument`] for an unknown name.
    pub fn set_compression_type(&mut self, name: Option<&str>) -> IioResult<()> {
        self.compression_guard()?;
        if self.caps.compression_schemes().is_empty() {
            return Err(IioError::unsupported("No settable compression types"));
        }
        let scheme = match name {
            Some(n) => Some(
                self.caps
                    .compression_scheme(n)
                    .ok_or_else(|| IioError::invalid_argument("Unknown compression type!"))?,
            ),
            None => None,
        };
        self.compression_type = scheme;
        Ok(())
    }

    pub fn compression_type(&self) -> IioResult<Option<&'static str>> {
        self.compression_guard()?;
        Ok(self.compression_type.map(CompressionScheme::name))
    }

    pub fn unset_compression(&mut self) -> IioResult<()> {
        self.compression_guard()?;
        self.reset_compression();
        Ok(())
    }

    /// Set quality in `[0, 1]`; higher means better quality.
    ///
    /// # Errors
    ///
    /// As [`compression_type`](Self::compression_type), plus
    /// [`IioError::InvalidState`] if schemes exist but none is chosen and
    /// [`IioError::InvalidArgument`] for a value outside `[0, 1]`.
    pub fn set_compression_quality(&mut self, quality: f32) -> IioResult<()> {
        self.selected_scheme()?;
        if !(0.0..=1.0).contains(&quality) {
            return Err(IioError::invalid_argument("Quality out-of-bounds!"));
        }
        self.compression_quality = quality;
        Ok(())
    }

    pub fn compression_quality(&self) -> IioResult<f32> {
        self.selected_scheme()?;
        Ok(self.compression_quality)
    }

    /// Whether the chosen scheme is lossless. Writers without named schemes
    /// report lossless.
    pub fn is_compression_lossless(&self) -> IioResult<bool> {
        Ok(self.selected_scheme()?.is_none_or(CompressionScheme::is_lossless))
    }

    pub fn compression_quality_descriptions(&self) -> IioResult<&'static [&'static str]> {
        Ok(self
            .selected_scheme()?
            .map_or(&[][..], CompressionScheme::quality_descriptions))
    }

    pub fn compression_quality_values(&self) -> IioResult<&'static [f32]> {
        Ok(self
            .selected_scheme()?
            .map_or(&[][..], CompressionScheme::quality_values))
    }

    fn compression_guard(&self) -> IioResult<()> {
        require_capability(self.caps.write_compressed(), COMPRESSION_UNSUPPORTED)?;
        assert_mode(self.compression_mode, ParamMode::Explicit, "compression")
    }

    /// The chosen scheme, after checking that one is chosen when the writer
    /// offers any.
    fn selected_scheme(&self) -> IioResult<Option<&'static CompressionScheme>> {
        self.compression_guard()?;
        if !self.caps.compression_schemes().is_empty() && self.compression_type.is_none() {
            return Err(IioError::invalid_state("No compression type set!"));
        }
        Ok(self.compression_type)
    }

    fn reset_compression(&mut self) {
        self.compression_type = None;
        self.compression_quality = 1.0;
    }
}
