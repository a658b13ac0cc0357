//! The canonical layouts every plug-in is expected to recognize.
//!
//! With the `std` feature each layout is built once and shared; without it
//! a fresh but equal value is built on each call.

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use rgb::Rgba;

use crate::color_space::{AlphaMode, ColorSpace};
use crate::data_type::DataType;
use crate::layout::{Grayscale, Indexed, Interleaved, Packed, PixelLayout};
use crate::palette::Palette;

/// Identifier of a canonical layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum StandardLayout {
    /// 8-bit RGB packed into an `Int`, no alpha.
    IntRgb = 0,
    /// 8-bit ARGB packed into an `Int`.
    IntArgb = 1,
    /// [`IntArgb`](Self::IntArgb) with premultiplied alpha.
    IntArgbPre = 2,
    /// 8-bit BGR packed into an `Int`, red in the low byte.
    IntBgr = 3,
    /// Interleaved bytes in B, G, R order.
    ThreeByteBgr = 4,
    /// Interleaved bytes in A, B, G, R order.
    FourByteAbgr = 5,
    /// [`FourByteAbgr`](Self::FourByteAbgr) with premultiplied alpha.
    FourByteAbgrPre = 6,
    /// 5-6-5 RGB packed into a `UShort`.
    Ushort565Rgb = 7,
    /// 5-5-5 RGB packed into a `UShort`.
    Ushort555Rgb = 8,
    /// 8-bit gray.
    ByteGray = 9,
    /// 16-bit gray.
    UshortGray = 10,
    /// 1-bit black and white palette.
    ByteBinary = 11,
    /// 8-bit palette: a 6x6x6 color cube followed by a gray ramp.
    ByteIndexed = 12,
}

const COUNT: usize = 13;

#[cfg(feature = "std")]
static MEMO: [std::sync::OnceLock<PixelLayout>; COUNT] =
    [const { std::sync::OnceLock::new() }; COUNT];

impl StandardLayout {
    pub const ALL: [StandardLayout; COUNT] = [
        Self::IntRgb,
        Self::IntArgb,
        Self::IntArgbPre,
        Self::IntBgr,
        Self::ThreeByteBgr,
        Self::FourByteAbgr,
        Self::FourByteAbgrPre,
        Self::Ushort565Rgb,
        Self::Ushort555Rgb,
        Self::ByteGray,
        Self::UshortGray,
        Self::ByteBinary,
        Self::ByteIndexed,
    ];

    /// The layout this id names.
    #[cfg(feature = "std")]
    pub fn layout(self) -> PixelLayout {
        MEMO[self as usize].get_or_init(|| self.build()).clone()
    }

    /// The layout this id names.
    #[cfg(not(feature = "std"))]
    pub fn layout(self) -> PixelLayout {
        self.build()
    }

    /// Whether `layout` is structurally equal to this standard layout.
    pub(crate) fn matches(self, layout: &PixelLayout) -> bool {
        // Cheap discriminant check before building or comparing palettes.
        let same_family = matches!(
            (self.family(), layout),
            (Family::Packed, PixelLayout::Packed(_))
                | (Family::Interleaved, PixelLayout::Interleaved(_))
                | (Family::Grayscale, PixelLayout::Grayscale(_))
                | (Family::Indexed, PixelLayout::Indexed(_))
        );
        same_family && self.layout() == *layout
    }

    fn family(self) -> Family {
        match self {
            Self::IntRgb
            | Self::IntArgb
            | Self::IntArgbPre
            | Self::IntBgr
            | Self::Ushort565Rgb
            | Self::Ushort555Rgb => Family::Packed,
            Self::ThreeByteBgr | Self::FourByteAbgr | Self::FourByteAbgrPre => {
                Family::Interleaved
            }
            Self::ByteGray | Self::UshortGray => Family::Grayscale,
            Self::ByteBinary | Self::ByteIndexed => Family::Indexed,
        }
    }

    fn build(self) -> PixelLayout {
        match self {
            Self::IntRgb => packed([0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0], DataType::Int, AlphaMode::None),
            Self::IntArgb => packed(
                [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000],
                DataType::Int,
                AlphaMode::Straight,
            ),
            Self::IntArgbPre => packed(
                [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000],
                DataType::Int,
                AlphaMode::Premultiplied,
            ),
            Self::IntBgr => packed([0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0], DataType::Int, AlphaMode::None),
            Self::ThreeByteBgr => interleaved(vec![2, 1, 0], AlphaMode::None),
            Self::FourByteAbgr => interleaved(vec![3, 2, 1, 0], AlphaMode::Straight),
            Self::FourByteAbgrPre => interleaved(vec![3, 2, 1, 0], AlphaMode::Premultiplied),
            Self::Ushort565Rgb => packed([0xF800, 0x07E0, 0x001F, 0], DataType::UShort, AlphaMode::None),
            Self::Ushort555Rgb => packed([0x7C00, 0x03E0, 0x001F, 0], DataType::UShort, AlphaMode::None),
            Self::ByteGray => gray(8, DataType::Byte),
            Self::UshortGray => gray(16, DataType::UShort),
            Self::ByteBinary => indexed(1, Palette::gray_ramp(1)),
            Self::ByteIndexed => indexed(8, color_cube()),
        }
    }
}

#[derive(Clone, Copy)]
enum Family {
    Packed,
    Interleaved,
    Grayscale,
    Indexed,
}

fn packed(masks: [u32; 4], transfer: DataType, alpha: AlphaMode) -> PixelLayout {
    PixelLayout::Packed(Packed {
        color_space: ColorSpace::Srgb,
        masks,
        transfer,
        alpha,
    })
}

fn interleaved(band_offsets: Vec<u32>, alpha: AlphaMode) -> PixelLayout {
    PixelLayout::Interleaved(Interleaved {
        color_space: ColorSpace::Srgb,
        band_offsets,
        data_type: DataType::Byte,
        alpha,
    })
}

fn gray(bits: u8, data_type: DataType) -> PixelLayout {
    PixelLayout::Grayscale(Grayscale {
        bits,
        data_type,
        signed: false,
        alpha: AlphaMode::None,
        ramp: None,
    })
}

fn indexed(bits: u8, palette: Palette) -> PixelLayout {
    PixelLayout::Indexed(Indexed {
        palette: Arc::new(palette),
        bits,
        data_type: DataType::Byte,
    })
}

/// 216 cube colors in steps of 51, then grays from 18 in steps of 6.
fn color_cube() -> Palette {
    let mut entries = Vec::with_capacity(256);
    for r in (0..=255u8).step_by(51) {
        for g in (0..=255u8).step_by(51) {
            for b in (0..=255u8).step_by(51) {
                entries.push(Rgba { r, g, b, a: 255 });
            }
        }
    }
    let step = 256 / (256 - entries.len());
    let mut v = step * 3;
    while entries.len() < 256 {
        let g = v as u8;
        entries.push(Rgba { r: g, g, b: g, a: 255 });
        v += step;
    }
    Palette::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_layout_recognizes_itself() {
        for id in StandardLayout::ALL {
            let layout = id.layout();
            assert_eq!(layout.standard_layout(), Some(id), "{id:?}");
        }
    }

    #[test]
    fn standard_layouts_are_distinct() {
        for a in StandardLayout::ALL {
            for b in StandardLayout::ALL {
                assert_eq!(a == b, a.layout() == b.layout(), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn public_constructors_reproduce_standard_layouts() {
        let rgb = PixelLayout::packed(
            ColorSpace::Srgb,
            0x00FF_0000,
            0x0000_FF00,
            0x0000_00FF,
            0,
            DataType::Int,
            false,
        )
        .unwrap();
        assert_eq!(rgb.standard_layout(), Some(StandardLayout::IntRgb));

        let abgr = PixelLayout::interleaved(ColorSpace::Srgb, &[3, 2, 1, 0], DataType::Byte, true, true)
            .unwrap();
        assert_eq!(abgr.standard_layout(), Some(StandardLayout::FourByteAbgrPre));

        let gray = PixelLayout::grayscale(16, DataType::UShort, false).unwrap();
        assert_eq!(gray.standard_layout(), Some(StandardLayout::UshortGray));

        let bw = PixelLayout::indexed(&[0, 255], &[0, 255], &[0, 255], None, 1, DataType::Byte).unwrap();
        assert_eq!(bw.standard_layout(), Some(StandardLayout::ByteBinary));

        let signed = PixelLayout::grayscale(16, DataType::Short, true).unwrap();
        assert_eq!(signed.standard_layout(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn concurrent_first_use_yields_one_layout() {
        use rayon::prelude::*;
        let seen: alloc::vec::Vec<PixelLayout> = (0..256)
            .into_par_iter()
            .map(|i| StandardLayout::ALL[i % COUNT].layout())
            .collect();
        for (i, layout) in seen.iter().enumerate() {
            assert_eq!(*layout, StandardLayout::ALL[i % COUNT].layout());
        }
        let a = seen[StandardLayout::ByteIndexed as usize].palette().unwrap();
        let b = StandardLayout::ByteIndexed.layout();
        assert!(core::ptr::eq(a, b.palette().unwrap()));
    }

    #[test]
    fn color_cube_contents() {
        let p = color_cube();
        assert_eq!(p.len(), 256);
        assert_eq!(p.entry(0), Some(Rgba { r: 0, g: 0, b: 0, a: 255 }));
        assert_eq!(p.entry(1), Some(Rgba { r: 0, g: 0, b: 51, a: 255 }));
        assert_eq!(p.entry(215), Some(Rgba { r: 255, g: 255, b: 255, a: 255 }));
        assert_eq!(p.entry(216), Some(Rgba { r: 18, g: 18, b: 18, a: 255 }));
        assert_eq!(p.entry(255), Some(Rgba { r: 252, g: 252, b: 252, a: 255 }));
        assert!(!p.has_alpha());
    }

    #[cfg(feature = "std")]
    #[test]
    fn memoized_layouts_share_palettes() {
        let a = StandardLayout::ByteIndexed.layout();
        let b = StandardLayout::ByteIndexed.layout();
        match (&a, &b) {
            (PixelLayout::Indexed(x), PixelLayout::Indexed(y)) => {
                assert!(Arc::ptr_eq(&x.palette, &y.palette));
            }
            _ => panic!("ByteIndexed is not indexed"),
        }
    }
}
