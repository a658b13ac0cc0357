//! Reader and writer traits.
//!
//! Format plug-ins implement [`ImageReader`] and [`ImageWriter`]. The traits
//! are object safe so a catalog can hand out `Box<dyn ImageReader>`.
//! The free functions at the bottom are the shared steps every reader runs
//! before touching pixels: reconcile regions, validate band mappings, and
//! find or allocate the destination.

use alloc::vec::Vec;

use enough::Stop;

use crate::bands::check_band_settings;
use crate::capabilities::CodecCapabilities;
use crate::error::{IioError, IioResult};
use crate::geometry::{Dimension, Rect};
use crate::image::{ImageBuffer, ImageFrame, PixelSource};
use crate::layout::PixelLayout;
use crate::mode::require_capability;
use crate::param::IioParam;
use crate::raster::Raster;
use crate::read_param::ImageReadParam;
use crate::region::{self, Regions, Subsampling};
use crate::write_param::ImageWriteParam;

/// Decodes images from a source the reader was created over.
///
/// Every decoding call takes a cooperative cancellation token; readers
/// should call `stop.check()?` between rows or tiles.
pub trait ImageReader: Send {
    /// Format name, e.g. `"png"`.
    fn format_name(&self) -> &str;

    fn capabilities(&self) -> &'static CodecCapabilities;

    /// Number of images in the source, or `None` if that would need a scan
    /// and `allow_search` is false.
    fn num_images(&mut self, allow_search: bool) -> IioResult<Option<u32>>;

    fn dimensions(&mut self, image_index: u32) -> IioResult<Dimension>;

    /// Layouts the image can be decoded into, preferred first. Never empty.
    fn image_types(&mut self, image_index: u32) -> IioResult<Vec<PixelLayout>>;

    /// Decode one image.
    ///
    /// With a destination set on `param`, readers take it out and decode
    /// into it (see [`destination`]).
    fn read(
        &mut self,
        image_index: u32,
        param: Option<&mut ImageReadParam>,
        stop: &dyn Stop,
    ) -> IioResult<ImageBuffer>;

    fn default_read_param(&self) -> ImageReadParam {
        ImageReadParam::new(self.capabilities())
    }

    /// Layout closest to the stored samples.
    fn raw_image_type(&mut self, image_index: u32) -> IioResult<Option<PixelLayout>> {
        Ok(self.image_types(image_index)?.into_iter().next())
    }

    fn aspect_ratio(&mut self, image_index: u32) -> IioResult<f64> {
        let d = self.dimensions(image_index)?;
        Ok(d.width as f64 / d.height as f64)
    }

    fn is_image_tiled(&mut self, _image_index: u32) -> IioResult<bool> {
        Ok(false)
    }

    /// Untiled images are one tile covering the whole image.
    fn tile_size(&mut self, image_index: u32) -> IioResult<Dimension> {
        self.dimensions(image_index)
    }

    fn read_tile(
        &mut self,
        image_index: u32,
        tile_x: u32,
        tile_y: u32,
        stop: &dyn Stop,
    ) -> IioResult<ImageBuffer> {
        if tile_x != 0 || tile_y != 0 {
            return Err(IioError::invalid_argument("Invalid tile indices"));
        }
        self.read(image_index, None, stop)
    }

    /// Decode raw samples without color interpretation.
    fn read_raster(
        &mut self,
        _image_index: u32,
        _param: Option<&ImageReadParam>,
        _stop: &dyn Stop,
    ) -> IioResult<Raster> {
        Err(IioError::unsupported("readRaster not supported!"))
    }

    fn num_thumbnails(&mut self, _image_index: u32) -> IioResult<u32> {
        Ok(0)
    }

    fn read_thumbnail(
        &mut self,
        _image_index: u32,
        _thumbnail_index: u32,
        _stop: &dyn Stop,
    ) -> IioResult<ImageBuffer> {
        Err(IioError::unsupported("Thumbnails not supported!"))
    }
}

/// Encodes images into an output the writer was created over.
pub trait ImageWriter: Send {
    fn format_name(&self) -> &str;

    fn capabilities(&self) -> &'static CodecCapabilities;

    /// Whether images in `layout` can be encoded.
    fn can_encode_layout(&self, layout: &PixelLayout) -> bool;

    /// Encode one frame.
    fn write(
        &mut self,
        frame: &ImageFrame,
        param: Option<&ImageWriteParam>,
        stop: &dyn Stop,
    ) -> IioResult<()>;

    fn default_write_param(&self) -> ImageWriteParam {
        ImageWriteParam::new(self.capabilities())
    }

    /// Reject frames this writer cannot encode.
    ///
    /// # Errors
    ///
    /// [`IioError::UnsupportedOperation`] for raw samples without
    /// `write_rasters`; [`IioError::InvalidArgument`] for a layout the
    /// writer cannot encode.
    fn check_writable(&self, frame: &ImageFrame) -> IioResult<()> {
        match &frame.source {
            PixelSource::RawSamples(_) => {
                require_capability(self.capabilities().write_rasters(), "Rasters not supported!")
            }
            PixelSource::Rendered(image) if !self.can_encode_layout(image.layout()) => Err(
                IioError::invalid_argument("image layout not supported by writer"),
            ),
            PixelSource::Rendered(_) => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared reader steps
// ---------------------------------------------------------------------------

/// Source rectangle after clipping to the image and aligning to the grid
/// offset. May be empty.
pub fn source_region_for(param: Option<&IioParam>, src_width: u32, src_height: u32) -> Rect {
    match param {
        Some(p) => p.clipped_source_region(src_width, src_height),
        None => Rect::from_size(
            src_width.min(i32::MAX as u32) as i32,
            src_height.min(i32::MAX as u32) as i32,
        ),
    }
}

/// Reconcile `param` (or the defaults) against the image and an optional
/// destination image.
pub fn compute_regions_for(
    param: Option<&IioParam>,
    src_width: u32,
    src_height: u32,
    destination: Option<&ImageBuffer>,
) -> IioResult<Regions> {
    let dest_size = destination.map(|d| Dimension::new(d.width(), d.height()));
    match param {
        Some(p) => p.compute_regions(src_width, src_height, dest_size),
        None => region::compute_regions(
            None,
            Subsampling::NONE,
            Default::default(),
            src_width,
            src_height,
            dest_size,
        ),
    }
}

/// Validate the band mapping of `param` for the given band counts.
pub fn check_read_param_band_settings(
    param: Option<&ImageReadParam>,
    num_src_bands: usize,
    num_dest_bands: usize,
) -> IioResult<()> {
    check_band_settings(
        param.and_then(|p| p.source_bands()),
        param.and_then(|p| p.destination_bands()),
        num_src_bands,
        num_dest_bands,
    )
}

/// The image a read should decode into.
///
/// A destination set on `param` is taken and returned unchanged. Otherwise
/// an image is allocated in the param's destination type, or the first of
/// `image_types`, large enough to hold the reconciled destination region.
///
/// # Errors
///
/// [`IioError::InvalidArgument`] if `image_types` is empty, if
/// `width * height` exceeds `i32::MAX`, or if the param's destination type
/// is not one of `image_types`. Region errors from [`compute_regions_for`].
pub fn destination(
    param: Option<&mut ImageReadParam>,
    image_types: &[PixelLayout],
    width: u32,
    height: u32,
) -> IioResult<ImageBuffer> {
    let Some(first) = image_types.first() else {
        return Err(IioError::invalid_argument("imageTypes null or empty!"));
    };
    if width as u64 * height as u64 > i32::MAX as u64 {
        return Err(IioError::invalid_argument("width*height > i32::MAX!"));
    }

    let mut layout = first;
    let mut common = None;
    if let Some(p) = param {
        if let Some(image) = p.take_destination() {
            return Ok(image);
        }
        if let Some(wanted) = p.destination_type() {
            layout = image_types.iter().find(|t| *t == wanted).ok_or_else(|| {
                IioError::invalid_argument("Destination type from ImageReadParam does not match!")
            })?;
        }
        common = Some(&**p);
    }

    let regions = compute_regions_for(common, width, height, None)?;
    let dest = regions.destination;
    // Reconciled regions are non-empty with a non-negative origin.
    let w = (dest.x as i64 + dest.width as i64) as u32;
    let h = (dest.y as i64 + dest.height as i64) as u32;
    log::debug!("allocating {w}x{h} destination for {width}x{height} source");
    layout.synthesize(w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_space::ColorSpace;
    use crate::data_type::DataType;
    use crate::geometry::Point;
    use alloc::boxed::Box;
    use alloc::vec;
    use enough::Unstoppable;

    static READ_CAPS: CodecCapabilities = CodecCapabilities::new();
    static WRITE_CAPS: CodecCapabilities = CodecCapabilities::new();

    fn rgb() -> PixelLayout {
        PixelLayout::interleaved(ColorSpace::Srgb, &[0, 1, 2], DataType::Byte, false, false).unwrap()
    }

    fn gray() -> PixelLayout {
        PixelLayout::grayscale(8, DataType::Byte, false).unwrap()
    }

    /// An 8x6 gray gradient: sample = x + 10 * y.
    struct GradientReader;

    impl ImageReader for GradientReader {
        fn format_name(&self) -> &str {
            "gradient"
        }

        fn capabilities(&self) -> &'static CodecCapabilities {
            &READ_CAPS
        }

        fn num_images(&mut self, _allow_search: bool) -> IioResult<Option<u32>> {
            Ok(Some(1))
        }

        fn dimensions(&mut self, image_index: u32) -> IioResult<Dimension> {
            if image_index != 0 {
                return Err(IioError::invalid_argument("imageIndex out of bounds"));
            }
            Ok(Dimension::new(8, 6))
        }

        fn image_types(&mut self, _image_index: u32) -> IioResult<Vec<PixelLayout>> {
            Ok(vec![gray(), rgb()])
        }

        fn read(
            &mut self,
            image_index: u32,
            mut param: Option<&mut ImageReadParam>,
            stop: &dyn Stop,
        ) -> IioResult<ImageBuffer> {
            let size = self.dimensions(image_index)?;
            let types = self.image_types(image_index)?;
            let mut image = destination(param.as_deref_mut(), &types, size.width, size.height)?;
            let common = param.as_deref().map(|p| &**p);
            let regions = compute_regions_for(common, size.width, size.height, Some(&image))?;
            let sub = common.map_or(Subsampling::NONE, IioParam::subsampling);
            let (src, dst) = (regions.source, regions.destination);
            for row in 0..dst.height {
                stop.check()?;
                let sy = src.y + row * sub.y_period() as i32;
                for col in 0..dst.width {
                    let sx = src.x + col * sub.x_period() as i32;
                    let value = (sx + 10 * sy) as f64;
                    let (dx, dy) = ((dst.x + col) as u32, (dst.y + row) as u32);
                    for band in 0..image.raster().num_bands() {
                        image.raster_mut().set_sample(dx, dy, band, value)?;
                    }
                }
            }
            Ok(image)
        }
    }

    struct GrayOnlyWriter;

    impl ImageWriter for GrayOnlyWriter {
        fn format_name(&self) -> &str {
            "gray-only"
        }

        fn capabilities(&self) -> &'static CodecCapabilities {
            &WRITE_CAPS
        }

        fn can_encode_layout(&self, layout: &PixelLayout) -> bool {
            layout.color_space() == ColorSpace::Gray
        }

        fn write(
            &mut self,
            frame: &ImageFrame,
            _param: Option<&ImageWriteParam>,
            stop: &dyn Stop,
        ) -> IioResult<()> {
            self.check_writable(frame)?;
            stop.check()?;
            Ok(())
        }
    }

    #[test]
    fn traits_are_object_safe() {
        let mut reader: Box<dyn ImageReader> = Box::new(GradientReader);
        assert_eq!(reader.format_name(), "gradient");
        assert_eq!(reader.num_images(false).unwrap(), Some(1));
        let writer: Box<dyn ImageWriter> = Box::new(GrayOnlyWriter);
        assert_eq!(writer.format_name(), "gray-only");
    }

    #[test]
    fn full_read_uses_first_type() {
        let mut reader = GradientReader;
        let image = reader.read(0, None, &Unstoppable).unwrap();
        assert_eq!((image.width(), image.height()), (8, 6));
        assert_eq!(image.layout(), &gray());
        assert_eq!(image.raster().sample(7, 5, 0).unwrap(), 57.0);
    }

    #[test]
    fn subsampled_read_with_offset() {
        let mut reader = GradientReader;
        let mut param = reader.default_read_param();
        param.set_source_subsampling(2, 2, 1, 0).unwrap();
        param.set_destination_offset(Point::new(1, 1));
        let image = reader.read(0, Some(&mut param), &Unstoppable).unwrap();
        // 7 usable columns -> 4 kept, shifted right by 1
        assert_eq!((image.width(), image.height()), (5, 4));
        assert_eq!(image.raster().sample(1, 1, 0).unwrap(), 1.0);
        assert_eq!(image.raster().sample(2, 1, 0).unwrap(), 3.0);
        assert_eq!(image.raster().sample(1, 2, 0).unwrap(), 21.0);
        assert_eq!(image.raster().sample(0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn read_into_supplied_destination() {
        let mut reader = GradientReader;
        let mut param = ImageReadParam::default();
        param.set_destination(Some(rgb().synthesize(4, 4).unwrap()));
        let image = reader.read(0, Some(&mut param), &Unstoppable).unwrap();
        assert_eq!(image.layout(), &rgb());
        assert_eq!((image.width(), image.height()), (4, 4));
        assert_eq!(image.raster().sample(3, 3, 2).unwrap(), 33.0);
        assert!(param.destination().is_none());
    }

    #[test]
    fn destination_type_must_be_offered() {
        let mut param = ImageReadParam::default();
        param.set_destination_type(Some(rgb()));
        let image = destination(Some(&mut param), &[gray(), rgb()], 3, 2).unwrap();
        assert_eq!(image.layout(), &rgb());

        let bgr = PixelLayout::interleaved(ColorSpace::Srgb, &[2, 1, 0], DataType::Byte, false, false).unwrap();
        param.set_destination_type(Some(bgr));
        let err = destination(Some(&mut param), &[gray(), rgb()], 3, 2).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
    }

    #[test]
    fn destination_argument_checks() {
        let err = destination(None, &[], 3, 2).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let err = destination(None, &[gray()], 65_536, 65_536).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
    }

    #[test]
    fn destination_covers_offset_region() {
        let mut param = ImageReadParam::default();
        param.set_source_region(Some(Rect::new(2, 2, 4, 4))).unwrap();
        param.set_destination_offset(Point::new(3, 1));
        let image = destination(Some(&mut param), &[gray()], 10, 10).unwrap();
        assert_eq!((image.width(), image.height()), (7, 5));
    }

    #[test]
    fn default_reader_behaviour() {
        let mut reader = GradientReader;
        assert_eq!(reader.raw_image_type(0).unwrap(), Some(gray()));
        assert!((reader.aspect_ratio(0).unwrap() - 8.0 / 6.0).abs() < 1e-12);
        assert!(!reader.is_image_tiled(0).unwrap());
        assert_eq!(reader.tile_size(0).unwrap(), Dimension::new(8, 6));
        assert!(reader.read_tile(0, 0, 0, &Unstoppable).is_ok());
        assert!(matches!(
            reader.read_tile(0, 1, 0, &Unstoppable),
            Err(IioError::InvalidArgument(_))
        ));
        assert!(matches!(
            reader.read_raster(0, None, &Unstoppable),
            Err(IioError::UnsupportedOperation(_))
        ));
        assert_eq!(reader.num_thumbnails(0).unwrap(), 0);
        assert!(reader.read_thumbnail(0, 0, &Unstoppable).is_err());
    }

    #[test]
    fn band_settings_from_param() {
        assert!(check_read_param_band_settings(None, 3, 3).is_ok());
        let mut param = ImageReadParam::default();
        param.set_source_bands(Some(&[0, 2])).unwrap();
        assert!(check_read_param_band_settings(Some(&param), 3, 3).is_err());
        param.set_destination_bands(Some(&[1, 0])).unwrap();
        assert!(check_read_param_band_settings(Some(&param), 3, 3).is_ok());
        assert!(check_read_param_band_settings(Some(&param), 2, 1).is_err());
    }

    #[test]
    fn source_region_helper() {
        assert_eq!(source_region_for(None, 5, 4), Rect::from_size(5, 4));
        let mut param = IioParam::new();
        param.set_source_subsampling(3, 3, 2, 1).unwrap();
        assert_eq!(source_region_for(Some(&param), 5, 4), Rect::new(2, 1, 3, 3));
    }

    #[test]
    fn writer_checks_frames() {
        let mut writer = GrayOnlyWriter;
        let gray_frame = ImageFrame::new(gray().synthesize(2, 2).unwrap());
        writer.write(&gray_frame, None, &Unstoppable).unwrap();

        let rgb_frame = ImageFrame::new(rgb().synthesize(2, 2).unwrap());
        assert!(matches!(
            writer.write(&rgb_frame, None, &Unstoppable),
            Err(IioError::InvalidArgument(_))
        ));

        let raw = ImageFrame::new(gray().synthesize(2, 2).unwrap().into_raster());
        assert!(matches!(
            writer.check_writable(&raw),
            Err(IioError::UnsupportedOperation(_))
        ));
        assert_eq!(
            writer.default_write_param().capabilities(),
            &CodecCapabilities::new()
        );
    }
}
