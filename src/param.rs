//! Settings shared by read and write parameters.

use alloc::vec::Vec;

use crate::bands::validate_band_subset;
use crate::error::{IioError, IioResult};
use crate::geometry::{Dimension, Point, Rect};
use crate::layout::PixelLayout;
use crate::region::{self, Regions, Subsampling};

/// Source region, subsampling, band subset, destination type and offset.
///
/// Every setter validates before it mutates, so a rejected call leaves the
/// previous settings in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IioParam {
    source_region: Option<Rect>,
    subsampling: Subsampling,
    source_bands: Option<Vec<u32>>,
    destination_type: Option<PixelLayout>,
    destination_offset: Point,
}

impl IioParam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict reading or writing to `region`, or clear the restriction.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] for a negative origin or a non-positive
    /// extent. [`IioError::InvalidState`] if the region is not wider and
    /// taller than the current grid offsets.
    pub fn set_source_region(&mut self, region: Option<Rect>) -> IioResult<()> {
        if let Some(r) = region {
            if r.x < 0 {
                return Err(IioError::invalid_argument("sourceRegion.x < 0!"));
            }
            if r.y < 0 {
                return Err(IioError::invalid_argument("sourceRegion.y < 0!"));
            }
            if r.width <= 0 {
                return Err(IioError::invalid_argument("sourceRegion.width <= 0!"));
            }
            if r.height <= 0 {
                return Err(IioError::invalid_argument("sourceRegion.height <= 0!"));
            }
            if r.width as u32 <= self.subsampling.x_offset() {
                return Err(IioError::invalid_state(
                    "sourceRegion.width <= subsamplingXOffset!",
                ));
            }
            if r.height as u32 <= self.subsampling.y_offset() {
                return Err(IioError::invalid_state(
                    "sourceRegion.height <= subsamplingYOffset!",
                ));
            }
        }
        self.source_region = region;
        Ok(())
    }

    pub fn source_region(&self) -> Option<Rect> {
        self.source_region
    }

    /// Keep every `x_period`-th column and `y_period`-th row, starting at the
    /// given grid offsets.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if a period is zero or an offset is not
    /// smaller than its period. [`IioError::InvalidState`] if a source
    /// region is set and an offset reaches its extent.
    pub fn set_source_subsampling(
        &mut self,
        x_period: u32,
        y_period: u32,
        x_offset: u32,
        y_offset: u32,
    ) -> IioResult<()> {
        let subsampling = Subsampling::new(x_period, y_period, x_offset, y_offset)?;
        if let Some(r) = self.source_region
            && (x_offset as i64 >= r.width as i64 || y_offset as i64 >= r.height as i64)
        {
            return Err(IioError::invalid_state("region contains no pixels!"));
        }
        self.subsampling = subsampling;
        Ok(())
    }

    pub fn subsampling(&self) -> Subsampling {
        self.subsampling
    }

    /// Select which source bands take part, or all of them with `None`.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if an index repeats.
    pub fn set_source_bands(&mut self, bands: Option<&[u32]>) -> IioResult<()> {
        if let Some(b) = bands {
            validate_band_subset(b)?;
        }
        self.source_bands = bands.map(<[u32]>::to_vec);
        Ok(())
    }

    pub fn source_bands(&self) -> Option<&[u32]> {
        self.source_bands.as_deref()
    }

    pub fn set_destination_type(&mut self, layout: Option<PixelLayout>) {
        self.destination_type = layout;
    }

    pub fn destination_type(&self) -> Option<&PixelLayout> {
        self.destination_type.as_ref()
    }

    /// Where the first kept source pixel lands in the destination.
    pub fn set_destination_offset(&mut self, offset: Point) {
        self.destination_offset = offset;
    }

    pub fn destination_offset(&self) -> Point {
        self.destination_offset
    }

    /// Reconcile these settings against a `src_width` x `src_height` image.
    ///
    /// See [`region::compute_regions`].
    pub fn compute_regions(
        &self,
        src_width: u32,
        src_height: u32,
        dest_size: Option<Dimension>,
    ) -> IioResult<Regions> {
        region::compute_regions(
            self.source_region,
            self.subsampling,
            self.destination_offset,
            src_width,
            src_height,
            dest_size,
        )
    }

    /// Source-side clipping only. See [`region::source_region`].
    pub fn clipped_source_region(&self, src_width: u32, src_height: u32) -> Rect {
        region::source_region(
            self.source_region,
            self.subsampling.x_offset(),
            self.subsampling.y_offset(),
            src_width,
            src_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = IioParam::new();
        assert_eq!(p.source_region(), None);
        assert_eq!(p.subsampling(), Subsampling::NONE);
        assert_eq!(p.source_bands(), None);
        assert_eq!(p.destination_type(), None);
        assert_eq!(p.destination_offset(), Point::ORIGIN);
    }

    #[test]
    fn region_rejections() {
        let mut p = IioParam::new();
        for r in [
            Rect::new(-1, 0, 5, 5),
            Rect::new(0, -1, 5, 5),
            Rect::new(0, 0, 0, 5),
            Rect::new(0, 0, 5, -2),
        ] {
            let err = p.set_source_region(Some(r)).unwrap_err();
            assert!(matches!(err, IioError::InvalidArgument(_)), "{r}");
        }
        assert_eq!(p.source_region(), None);

        p.set_source_subsampling(4, 4, 3, 0).unwrap();
        let err = p.set_source_region(Some(Rect::new(0, 0, 3, 10))).unwrap_err();
        assert!(matches!(err, IioError::InvalidState(_)));
        p.set_source_region(Some(Rect::new(0, 0, 4, 10))).unwrap();
        p.set_source_region(None).unwrap();
        assert_eq!(p.source_region(), None);
    }

    #[test]
    fn subsampling_rejections() {
        let mut p = IioParam::new();
        assert!(matches!(
            p.set_source_subsampling(0, 1, 0, 0),
            Err(IioError::InvalidArgument(_))
        ));
        assert!(matches!(
            p.set_source_subsampling(2, 2, 2, 0),
            Err(IioError::InvalidArgument(_))
        ));
        p.set_source_region(Some(Rect::new(0, 0, 2, 8))).unwrap();
        let err = p.set_source_subsampling(4, 4, 2, 0).unwrap_err();
        assert!(matches!(err, IioError::InvalidState(_)));
        assert_eq!(p.subsampling(), Subsampling::NONE);
        p.set_source_subsampling(4, 4, 1, 3).unwrap();
        assert_eq!(p.subsampling().y_offset(), 3);
    }

    #[test]
    fn duplicate_bands_leave_state_untouched() {
        let mut p = IioParam::new();
        let err = p.set_source_bands(Some(&[0, 1, 1])).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        assert_eq!(p.source_bands(), None);

        p.set_source_bands(Some(&[2, 0])).unwrap();
        assert!(p.set_source_bands(Some(&[1, 1])).is_err());
        assert_eq!(p.source_bands(), Some(&[2, 0][..]));
        p.set_source_bands(None).unwrap();
        assert_eq!(p.source_bands(), None);
    }

    #[test]
    fn regions_use_settings() {
        let mut p = IioParam::new();
        p.set_source_region(Some(Rect::new(0, 0, 10, 10))).unwrap();
        p.set_source_subsampling(2, 2, 0, 0).unwrap();
        p.set_destination_offset(Point::new(-2, 0));
        let r = p.compute_regions(10, 10, None).unwrap();
        assert_eq!(r.source, Rect::new(4, 0, 6, 10));
        assert_eq!(r.destination, Rect::new(0, 0, 3, 5));
        assert_eq!(p.clipped_source_region(8, 8), Rect::new(0, 0, 8, 8));
    }
}
