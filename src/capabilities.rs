//! Plug-in capability descriptors.
//!
//! Each reader and writer returns a static [`CodecCapabilities`] describing
//! which optional features it implements. Parameter objects consult it
//! before accepting a setting, so callers get
//! [`UnsupportedOperation`](crate::IioError::UnsupportedOperation) up front
//! instead of a setting the plug-in would silently ignore.
//!
//! # Example
//!
//! ```
//! use imageio_types::{CodecCapabilities, CompressionScheme, TileSizeRange};
//!
//! static SCHEMES: [CompressionScheme; 2] = [
//!     CompressionScheme::new("Deflate").with_lossless(true),
//!     CompressionScheme::new("JPEG").with_quality_levels(&["low", "high"], &[0.25, 0.75]),
//! ];
//! static TILES: [TileSizeRange; 1] = [TileSizeRange::new(16, 16, 1024, 1024)];
//! static CAPS: CodecCapabilities = CodecCapabilities::new()
//!     .with_write_tiles(true)
//!     .with_write_compressed(true)
//!     .with_compression_schemes(&SCHEMES)
//!     .with_preferred_tile_sizes(&TILES);
//!
//! assert!(CAPS.write_tiles());
//! assert!(!CAPS.offset_tiles());
//! assert_eq!(CAPS.compression_scheme("jpeg").map(|s| s.name()), Some("JPEG"));
//! ```

use crate::geometry::Dimension;

/// One compression scheme a writer offers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressionScheme {
    name: &'static str,
    lossless: bool,
    quality_descriptions: &'static [&'static str],
    quality_values: &'static [f32],
}

impl CompressionScheme {
    /// A lossy scheme with no described quality levels.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            lossless: false,
            quality_descriptions: &[],
            quality_values: &[],
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_lossless(&self) -> bool {
        self.lossless
    }

    /// Human-readable names of the quality levels.
    pub const fn quality_descriptions(&self) -> &'static [&'static str] {
        self.quality_descriptions
    }

    /// Quality values delimiting the described levels.
    pub const fn quality_values(&self) -> &'static [f32] {
        self.quality_values
    }

    pub const fn with_lossless(mut self, v: bool) -> Self {
        self.lossless = v;
        self
    }

    /// Attach described quality levels.
    pub const fn with_quality_levels(
        mut self,
        descriptions: &'static [&'static str],
        values: &'static [f32],
    ) -> Self {
        self.quality_descriptions = descriptions;
        self.quality_values = values;
        self
    }
}

/// Inclusive range of tile sizes a writer prefers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileSizeRange {
    pub min: Dimension,
    pub max: Dimension,
}

impl TileSizeRange {
    pub const fn new(min_width: u32, min_height: u32, max_width: u32, max_height: u32) -> Self {
        Self {
            min: Dimension::new(min_width, min_height),
            max: Dimension::new(max_width, max_height),
        }
    }

    pub const fn contains(&self, width: u32, height: u32) -> bool {
        width >= self.min.width
            && width <= self.max.width
            && height >= self.min.height
            && height <= self.max.height
    }
}

/// Describes which optional features a reader or writer supports.
///
/// Getter methods keep the fields private so flags can be added over time
/// without breaking changes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct CodecCapabilities {
    read_raster: bool,
    source_render_size: bool,
    read_thumbnails: bool,
    write_rasters: bool,
    write_tiles: bool,
    offset_tiles: bool,
    write_progressive: bool,
    write_compressed: bool,
    write_sequence: bool,
    compression_schemes: &'static [CompressionScheme],
    preferred_tile_sizes: &'static [TileSizeRange],
}

impl Default for CodecCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecCapabilities {
    /// Everything disabled.
    pub const fn new() -> Self {
        Self {
            read_raster: false,
            source_render_size: false,
            read_thumbnails: false,
            write_rasters: false,
            write_tiles: false,
            offset_tiles: false,
            write_progressive: false,
            write_compressed: false,
            write_sequence: false,
            compression_schemes: &[],
            preferred_tile_sizes: &[],
        }
    }

    /// Whether the reader can return raw samples without color
    /// interpretation.
    pub const fn read_raster(&self) -> bool {
        self.read_raster
    }

    /// Whether the reader can render at a caller-chosen size.
    pub const fn source_render_size(&self) -> bool {
        self.source_render_size
    }

    pub const fn read_thumbnails(&self) -> bool {
        self.read_thumbnails
    }

    /// Whether the writer accepts [`PixelSource::RawSamples`](crate::PixelSource::RawSamples).
    pub const fn write_rasters(&self) -> bool {
        self.write_rasters
    }

    pub const fn write_tiles(&self) -> bool {
        self.write_tiles
    }

    /// Whether the tile grid may start at a non-zero offset.
    pub const fn offset_tiles(&self) -> bool {
        self.offset_tiles
    }

    pub const fn write_progressive(&self) -> bool {
        self.write_progressive
    }

    pub const fn write_compressed(&self) -> bool {
        self.write_compressed
    }

    /// Whether several images can be appended to one output.
    pub const fn write_sequence(&self) -> bool {
        self.write_sequence
    }

    pub const fn compression_schemes(&self) -> &'static [CompressionScheme] {
        self.compression_schemes
    }

    /// Look up a scheme by name, ignoring ASCII case.
    pub fn compression_scheme(&self, name: &str) -> Option<&'static CompressionScheme> {
        self.compression_schemes
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub const fn preferred_tile_sizes(&self) -> &'static [TileSizeRange] {
        self.preferred_tile_sizes
    }

    // --- const builder methods for static construction ---

    pub const fn with_read_raster(mut self, v: bool) -> Self {
        self.read_raster = v;
        self
    }

    pub const fn with_source_render_size(mut self, v: bool) -> Self {
        self.source_render_size = v;
        self
    }

    pub const fn with_read_thumbnails(mut self, v: bool) -> Self {
        self.read_thumbnails = v;
        self
    }

    pub const fn with_write_rasters(mut self, v: bool) -> Self {
        self.write_rasters = v;
        self
    }

    pub const fn with_write_tiles(mut self, v: bool) -> Self {
        self.write_tiles = v;
        self
    }

    pub const fn with_offset_tiles(mut self, v: bool) -> Self {
        self.offset_tiles = v;
        self
    }

    pub const fn with_write_progressive(mut self, v: bool) -> Self {
        self.write_progressive = v;
        self
    }

    pub const fn with_write_compressed(mut self, v: bool) -> Self {
        self.write_compressed = v;
        self
    }

    pub const fn with_write_sequence(mut self, v: bool) -> Self {
        self.write_sequence = v;
        self
    }

    pub const fn with_compression_schemes(mut self, v: &'static [CompressionScheme]) -> Self {
        self.compression_schemes = v;
        self
    }

    pub const fn with_preferred_tile_sizes(mut self, v: &'static [TileSizeRange]) -> Self {
        self.preferred_tile_sizes = v;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_all_false() {
        let caps = CodecCapabilities::default();
        assert!(!caps.read_raster());
        assert!(!caps.source_render_size());
        assert!(!caps.read_thumbnails());
        assert!(!caps.write_rasters());
        assert!(!caps.write_tiles());
        assert!(!caps.offset_tiles());
        assert!(!caps.write_progressive());
        assert!(!caps.write_compressed());
        assert!(!caps.write_sequence());
        assert!(caps.compression_schemes().is_empty());
        assert!(caps.preferred_tile_sizes().is_empty());
    }

    #[test]
    fn builder_sets_flags() {
        let caps = CodecCapabilities::new()
            .with_read_raster(true)
            .with_write_tiles(true)
            .with_offset_tiles(true)
            .with_write_sequence(true);
        assert!(caps.read_raster());
        assert!(caps.write_tiles());
        assert!(caps.offset_tiles());
        assert!(caps.write_sequence());
        assert!(!caps.write_progressive());
    }

    #[test]
    fn static_construction() {
        static SCHEMES: [CompressionScheme; 2] = [
            CompressionScheme::new("LZW").with_lossless(true),
            CompressionScheme::new("JPEG").with_quality_levels(&["low", "high"], &[0.0, 0.5, 1.0]),
        ];
        static CAPS: CodecCapabilities = CodecCapabilities::new()
            .with_write_compressed(true)
            .with_compression_schemes(&SCHEMES);
        assert!(CAPS.write_compressed());
        assert_eq!(CAPS.compression_schemes().len(), 2);
        let lzw = CAPS.compression_scheme("lzw").unwrap();
        assert!(lzw.is_lossless());
        let jpeg = CAPS.compression_scheme("JPEG").unwrap();
        assert_eq!(jpeg.quality_descriptions(), &["low", "high"]);
        assert_eq!(jpeg.quality_values().len(), 3);
        assert!(CAPS.compression_scheme("zstd").is_none());
    }

    #[test]
    fn tile_range_is_inclusive() {
        let r = TileSizeRange::new(8, 8, 64, 32);
        assert!(r.contains(8, 8));
        assert!(r.contains(64, 32));
        assert!(!r.contains(65, 16));
        assert!(!r.contains(16, 4));
    }
}
