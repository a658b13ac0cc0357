//! Region reconciliation.
//!
//! Turns a requested source rectangle, a subsampling grid and a destination
//! offset into the concrete source and destination rectangles a decode
//! works with. The steps run in a fixed order and each one may drop source
//! pixels at the edges:
//!
//! 1. clip the request to the image,
//! 2. align it to the subsampling grid offset,
//! 3. drop source columns/rows that would land left of or above a negative
//!    destination offset,
//! 4. derive the destination extent from the subsampled source extent,
//! 5. clip to the destination buffer, dropping the matching source pixels.
//!
//! Step 3 happens before the subsampled extent is computed, step 5 after.
//! Plug-ins rely on exactly which edge pixels each step drops, so the order
//! must not change.

use core::fmt;

use crate::error::{IioError, IioResult};
use crate::geometry::{Dimension, Point, Rect, clamp_i32};

/// Source decimation: keep every `period`-th pixel starting at `offset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subsampling {
    x_period: u32,
    y_period: u32,
    x_offset: u32,
    y_offset: u32,
}

impl Subsampling {
    /// Every pixel, starting at the origin.
    pub const NONE: Self = Self {
        x_period: 1,
        y_period: 1,
        x_offset: 0,
        y_offset: 0,
    };

    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if a period is zero or an offset is not
    /// smaller than its period.
    pub fn new(x_period: u32, y_period: u32, x_offset: u32, y_offset: u32) -> IioResult<Self> {
        if x_period == 0 || y_period == 0 {
            return Err(IioError::invalid_argument("Period <= 0!"));
        }
        if x_offset >= x_period {
            return Err(IioError::invalid_argument("subsamplingXOffset out of range!"));
        }
        if y_offset >= y_period {
            return Err(IioError::invalid_argument("subsamplingYOffset out of range!"));
        }
        Ok(Self {
            x_period,
            y_period,
            x_offset,
            y_offset,
        })
    }

    #[inline]
    pub const fn x_period(&self) -> u32 {
        self.x_period
    }

    #[inline]
    pub const fn y_period(&self) -> u32 {
        self.y_period
    }

    #[inline]
    pub const fn x_offset(&self) -> u32 {
        self.x_offset
    }

    #[inline]
    pub const fn y_offset(&self) -> u32 {
        self.y_offset
    }

    /// Whether every source pixel is kept.
    pub const fn is_identity(&self) -> bool {
        self.x_period == 1 && self.y_period == 1
    }
}

impl Default for Subsampling {
    fn default() -> Self {
        Self::NONE
    }
}

/// Reconciled source and destination rectangles. Neither is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Regions {
    /// Source pixels to read, before subsampling.
    pub source: Rect,
    /// Destination pixels to write.
    pub destination: Rect,
}

impl fmt::Display for Regions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// Wide rectangle so intermediate steps cannot overflow.
#[derive(Clone, Copy, Debug)]
struct Span {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl Span {
    fn sized(w: i64, h: i64) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    fn intersect(self, other: Span) -> Span {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Span {
            x,
            y,
            w: (self.x + self.w).min(other.x + other.w) - x,
            h: (self.y + self.h).min(other.y + other.h) - y,
        }
    }

    fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    fn narrow(self) -> Rect {
        Rect::new(
            clamp_i32(self.x),
            clamp_i32(self.y),
            clamp_i32(self.w),
            clamp_i32(self.h),
        )
    }
}

impl From<Rect> for Span {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x as i64,
            y: r.y as i64,
            w: r.width as i64,
            h: r.height as i64,
        }
    }
}

fn clip_and_align(requested: Option<Rect>, x_offset: u32, y_offset: u32, width: u32, height: u32) -> Span {
    let mut src = Span::sized(width as i64, height as i64);
    if let Some(r) = requested {
        src = src.intersect(r.into());
    }
    src.x += x_offset as i64;
    src.y += y_offset as i64;
    src.w -= x_offset as i64;
    src.h -= y_offset as i64;
    src
}

/// Source-side clipping only: intersect with the image and align to the
/// grid offset.
///
/// Unlike [`compute_regions`] the result may be empty; callers decide what
/// that means.
pub fn source_region(
    requested: Option<Rect>,
    x_offset: u32,
    y_offset: u32,
    src_width: u32,
    src_height: u32,
) -> Rect {
    clip_and_align(requested, x_offset, y_offset, src_width, src_height).narrow()
}

/// Reconcile a read request against the image and an optional destination.
///
/// `dest_size` is the size of a caller-supplied destination buffer; without
/// one the destination is unbounded.
///
/// # Errors
///
/// [`IioError::EmptyRegion`] if clipping to the destination buffer leaves
/// nothing, or if either final rectangle is empty.
pub fn compute_regions(
    requested: Option<Rect>,
    subsampling: Subsampling,
    dest_offset: Point,
    src_width: u32,
    src_height: u32,
    dest_size: Option<Dimension>,
) -> IioResult<Regions> {
    let x_period = subsampling.x_period as i64;
    let y_period = subsampling.y_period as i64;

    let mut src = clip_and_align(
        requested,
        subsampling.x_offset,
        subsampling.y_offset,
        src_width,
        src_height,
    );
    let mut dest = Span::sized(src_width as i64, src_height as i64);
    dest.x = dest_offset.x as i64;
    dest.y = dest_offset.y as i64;

    if dest.x < 0 {
        let delta = -dest.x * x_period;
        src.x += delta;
        src.w -= delta;
        dest.x = 0;
    }
    if dest.y < 0 {
        let delta = -dest.y * y_period;
        src.y += delta;
        src.h -= delta;
        dest.y = 0;
    }

    // Truncating division, so a negative width stays non-positive.
    let sub_w = (src.w + x_period - 1) / x_period;
    let sub_h = (src.h + y_period - 1) / y_period;
    dest.w = sub_w;
    dest.h = sub_h;

    if let Some(size) = dest_size {
        let bounds = Span::sized(size.width as i64, size.height as i64);
        dest = dest.intersect(bounds);
        if dest.is_empty() {
            return Err(IioError::EmptyRegion("Empty destination region!"));
        }
        let over_x = dest.x + sub_w - bounds.w;
        if over_x > 0 {
            src.w -= over_x * x_period;
        }
        let over_y = dest.y + sub_h - bounds.h;
        if over_y > 0 {
            src.h -= over_y * y_period;
        }
    }

    if src.is_empty() || dest.is_empty() {
        return Err(IioError::EmptyRegion("Empty region!"));
    }
    let regions = Regions {
        source: src.narrow(),
        destination: dest.narrow(),
    };
    log::trace!("reconciled {src_width}x{src_height} read: {regions}");
    Ok(regions)
}
