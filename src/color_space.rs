//! Color spaces and alpha interpretation.

use core::num::NonZeroU8;

/// Broad classification of a color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorFamily {
    Rgb,
    Gray,
    Xyz,
    Ycc,
    Cmyk,
    /// Arbitrary data planes with no colorimetric meaning.
    Generic,
}

/// Color space of a layout's color components (alpha excluded).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorSpace {
    /// sRGB (IEC 61966-2-1).
    Srgb,
    /// sRGB primaries with a linear transfer curve.
    LinearRgb,
    /// Single luminance component.
    Gray,
    /// CIE 1931 XYZ.
    CieXyz,
    /// Kodak Photo YCC.
    PhotoYcc,
    /// Device CMYK.
    Cmyk,
    /// `n` uninterpreted components.
    Generic(NonZeroU8),
}

impl ColorSpace {
    /// Number of color components, excluding alpha.
    #[inline]
    pub const fn num_components(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Srgb | Self::LinearRgb | Self::CieXyz | Self::PhotoYcc => 3,
            Self::Cmyk => 4,
            Self::Generic(n) => n.get() as usize,
        }
    }

    pub const fn family(self) -> ColorFamily {
        match self {
            Self::Srgb | Self::LinearRgb => ColorFamily::Rgb,
            Self::Gray => ColorFamily::Gray,
            Self::CieXyz => ColorFamily::Xyz,
            Self::PhotoYcc => ColorFamily::Ycc,
            Self::Cmyk => ColorFamily::Cmyk,
            Self::Generic(_) => ColorFamily::Generic,
        }
    }

    /// Whether this is one of the three-component RGB spaces.
    #[inline]
    pub const fn is_rgb(self) -> bool {
        matches!(self.family(), ColorFamily::Rgb)
    }
}

/// Alpha channel interpretation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum AlphaMode {
    /// No alpha channel.
    #[default]
    None = 0,
    /// Straight (unassociated) alpha.
    Straight = 1,
    /// Premultiplied (associated) alpha.
    Premultiplied = 2,
}

impl AlphaMode {
    /// Combine the `has_alpha` / `premultiplied` flag pair.
    ///
    /// A premultiplied flag without alpha collapses to [`AlphaMode::None`].
    pub const fn from_flags(has_alpha: bool, premultiplied: bool) -> Self {
        match (has_alpha, premultiplied) {
            (false, _) => Self::None,
            (true, false) => Self::Straight,
            (true, true) => Self::Premultiplied,
        }
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        !matches!(self, Self::None)
    }

    #[inline]
    pub const fn is_premultiplied(self) -> bool {
        matches!(self, Self::Premultiplied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_counts() {
        assert_eq!(ColorSpace::Gray.num_components(), 1);
        assert_eq!(ColorSpace::Srgb.num_components(), 3);
        assert_eq!(ColorSpace::Cmyk.num_components(), 4);
        let five = NonZeroU8::new(5).unwrap();
        assert_eq!(ColorSpace::Generic(five).num_components(), 5);
    }

    #[test]
    fn rgb_family() {
        assert!(ColorSpace::Srgb.is_rgb());
        assert!(ColorSpace::LinearRgb.is_rgb());
        assert!(!ColorSpace::CieXyz.is_rgb());
        assert!(!ColorSpace::PhotoYcc.is_rgb());
        assert_eq!(ColorSpace::Gray.family(), ColorFamily::Gray);
    }

    #[test]
    fn alpha_flags() {
        assert_eq!(AlphaMode::from_flags(false, true), AlphaMode::None);
        assert_eq!(AlphaMode::from_flags(true, false), AlphaMode::Straight);
        assert_eq!(AlphaMode::from_flags(true, true), AlphaMode::Premultiplied);
        assert!(AlphaMode::Straight.has_alpha());
        assert!(!AlphaMode::Straight.is_premultiplied());
        assert_eq!(AlphaMode::default(), AlphaMode::None);
    }
}
