//! Pixel layouts: how a pixel's samples map to color and to memory.
//!
//! [`PixelLayout`] is a closed sum of five storage families. Each variant
//! keeps only the fields its family needs, and every derived query
//! ([`bits_per_band`](PixelLayout::bits_per_band),
//! [`sample_model`](PixelLayout::sample_model),
//! [`synthesize`](PixelLayout::synthesize)) is one `match` over the variant.
//!
//! Layouts are immutable values. Equality and hashing are structural, so two
//! layouts built from the same parameters are interchangeable.
//!
//! ```
//! use imageio_types::{ColorSpace, DataType, PixelLayout};
//!
//! let a = PixelLayout::interleaved(ColorSpace::Srgb, &[2, 1, 0], DataType::Byte, false, false)?;
//! let b = PixelLayout::interleaved(ColorSpace::Srgb, &[2, 1, 0], DataType::Byte, false, false)?;
//! assert_eq!(a, b);
//!
//! let image = a.synthesize(64, 32)?;
//! assert_eq!(image.width(), 64);
//! # Ok::<(), imageio_types::IioError>(())
//! ```

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::color_space::{AlphaMode, ColorSpace};
use crate::data_type::DataType;
use crate::error::{IioError, IioResult};
use crate::image::ImageBuffer;
use crate::palette::Palette;
use crate::raster::{Raster, SampleModel, SampleStorage};
use crate::standard::StandardLayout;

/// Describes how pixels are stored and interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelLayout {
    /// All channels share one integer element per pixel.
    Packed(Packed),
    /// One element per channel, channels interleaved within each pixel.
    Interleaved(Interleaved),
    /// One element per channel, each channel in a chosen bank.
    Banded(Banded),
    /// Single gray channel (plus optional alpha), direct or palette ramp.
    Grayscale(Grayscale),
    /// Palette indices.
    Indexed(Indexed),
}

/// Packed storage parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Packed {
    pub(crate) color_space: ColorSpace,
    /// Red, green, blue, alpha. A zero alpha mask means no alpha.
    pub(crate) masks: [u32; 4],
    pub(crate) transfer: DataType,
    pub(crate) alpha: AlphaMode,
}

/// Interleaved storage parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interleaved {
    pub(crate) color_space: ColorSpace,
    pub(crate) band_offsets: Vec<u32>,
    pub(crate) data_type: DataType,
    pub(crate) alpha: AlphaMode,
}

/// Banded storage parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Banded {
    pub(crate) color_space: ColorSpace,
    pub(crate) bank_indices: Vec<u32>,
    pub(crate) band_offsets: Vec<u32>,
    pub(crate) data_type: DataType,
    pub(crate) alpha: AlphaMode,
}

/// Grayscale parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grayscale {
    pub(crate) bits: u8,
    pub(crate) data_type: DataType,
    pub(crate) signed: bool,
    pub(crate) alpha: AlphaMode,
    /// Gray ramp when the depth does not fill a native element.
    pub(crate) ramp: Option<Arc<Palette>>,
}

/// Indexed parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Indexed {
    pub(crate) palette: Arc<Palette>,
    pub(crate) bits: u8,
    pub(crate) data_type: DataType,
}

impl Packed {
    pub fn masks(&self) -> [u32; 4] {
        self.masks
    }

    pub fn transfer_type(&self) -> DataType {
        self.transfer
    }
}

impl Interleaved {
    pub fn band_offsets(&self) -> &[u32] {
        &self.band_offsets
    }
}

impl Banded {
    pub fn bank_indices(&self) -> &[u32] {
        &self.bank_indices
    }

    pub fn band_offsets(&self) -> &[u32] {
        &self.band_offsets
    }
}

impl Grayscale {
    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Whether samples are stored directly rather than through a ramp.
    pub fn is_direct(&self) -> bool {
        self.ramp.is_none()
    }
}

impl Indexed {
    pub fn bits(&self) -> u8 {
        self.bits
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

const LEGAL_BITS: [u8; 5] = [1, 2, 4, 8, 16];

fn check_bits(bits: u8) -> IioResult<()> {
    if LEGAL_BITS.contains(&bits) {
        Ok(())
    } else {
        Err(IioError::invalid_argument("Bad value for bits!"))
    }
}

/// Whether a nonzero mask is one run of set bits.
fn is_contiguous(mask: u32) -> bool {
    let run = (mask >> mask.trailing_zeros()) as u64;
    run & (run + 1) == 0
}

fn check_band_count(color_space: ColorSpace, has_alpha: bool, len: usize) -> IioResult<()> {
    if len != color_space.num_components() + has_alpha as usize {
        return Err(IioError::invalid_argument("bandOffsets.length is wrong!"));
    }
    Ok(())
}

/// Samples stored one per element when the depth fills a byte or short.
fn palette_storage(bits: u8, width: u32, data_type: DataType) -> SampleStorage {
    if bits == 8 || bits == 16 {
        SampleStorage::PixelInterleaved {
            pixel_stride: 1,
            scanline_stride: width,
            band_offsets: alloc::vec![0],
        }
    } else {
        let elem = data_type.bits() as u64;
        let stride = (width as u64 * bits as u64).div_ceil(elem);
        SampleStorage::MultiPixelPacked {
            bits,
            scanline_stride: saturate_u32(stride),
        }
    }
}

// Oversized strides saturate and are rejected by the bank-size check.
fn saturate_u32(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

impl PixelLayout {
    /// A layout whose channels share one integer element per pixel.
    ///
    /// `alpha == 0` means no alpha channel; `premultiplied` is ignored then.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `color_space` is not RGB, if
    /// `transfer` is not `Byte`, `UShort` or `Int`, if every mask is zero, or
    /// if a mask is not contiguous or does not fit in `transfer`.
    pub fn packed(
        color_space: ColorSpace,
        red: u32,
        green: u32,
        blue: u32,
        alpha: u32,
        transfer: DataType,
        premultiplied: bool,
    ) -> IioResult<Self> {
        if !color_space.is_rgb() {
            return Err(IioError::invalid_argument(
                "colorSpace must be of type RGB!",
            ));
        }
        if !transfer.can_pack_bits() {
            return Err(IioError::invalid_argument("Bad value for transferType!"));
        }
        let masks = [red, green, blue, alpha];
        if masks.iter().all(|&m| m == 0) {
            return Err(IioError::invalid_argument(
                "No mask has at least 1 bit set!",
            ));
        }
        let width = transfer.bits();
        for &m in masks.iter().filter(|&&m| m != 0) {
            if width < 32 && m >> width != 0 {
                return Err(IioError::invalid_argument("mask exceeds transferType size!"));
            }
            if !is_contiguous(m) {
                return Err(IioError::invalid_argument("mask bits must be contiguous!"));
            }
        }
        Ok(Self::Packed(Packed {
            color_space,
            masks,
            transfer,
            alpha: AlphaMode::from_flags(alpha != 0, premultiplied),
        }))
    }

    /// A layout with one element per channel, interleaved within each pixel.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `band_offsets` does not hold one entry
    /// per color component plus one for alpha.
    pub fn interleaved(
        color_space: ColorSpace,
        band_offsets: &[u32],
        data_type: DataType,
        has_alpha: bool,
        premultiplied: bool,
    ) -> IioResult<Self> {
        check_band_count(color_space, has_alpha, band_offsets.len())?;
        Ok(Self::Interleaved(Interleaved {
            color_space,
            band_offsets: band_offsets.to_vec(),
            data_type,
            alpha: AlphaMode::from_flags(has_alpha, premultiplied),
        }))
    }

    /// A layout with each channel placed in bank `bank_indices[i]` at
    /// `band_offsets[i]`.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if the two arrays differ in length, or
    /// if they do not hold one entry per color component plus one for alpha.
    pub fn banded(
        color_space: ColorSpace,
        bank_indices: &[u32],
        band_offsets: &[u32],
        data_type: DataType,
        has_alpha: bool,
        premultiplied: bool,
    ) -> IioResult<Self> {
        if bank_indices.len() != band_offsets.len() {
            return Err(IioError::invalid_argument(
                "bankIndices.length != bandOffsets.length!",
            ));
        }
        check_band_count(color_space, has_alpha, band_offsets.len())?;
        Ok(Self::Banded(Banded {
            color_space,
            bank_indices: bank_indices.to_vec(),
            band_offsets: band_offsets.to_vec(),
            data_type,
            alpha: AlphaMode::from_flags(has_alpha, premultiplied),
        }))
    }

    /// A single-channel gray layout.
    ///
    /// 8-bit `Byte` and 16-bit `UShort`/`Short` store samples directly. Any
    /// other depth stores indices into a linear ramp of `2^bits` grays.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `bits` is not 1, 2, 4, 8 or 16, if
    /// `data_type` is not `Byte`, `UShort` or `Short`, if `bits` exceeds the
    /// element size, or if a sub-16-bit ramp is requested in `Short`.
    pub fn grayscale(bits: u8, data_type: DataType, signed: bool) -> IioResult<Self> {
        Self::gray(bits, data_type, signed, AlphaMode::None)
    }

    /// A gray + alpha layout. Only direct depths can carry alpha.
    ///
    /// # Errors
    ///
    /// As [`grayscale`](Self::grayscale), plus [`IioError::InvalidArgument`]
    /// if the depth needs a palette ramp.
    pub fn grayscale_alpha(
        bits: u8,
        data_type: DataType,
        signed: bool,
        premultiplied: bool,
    ) -> IioResult<Self> {
        Self::gray(bits, data_type, signed, AlphaMode::from_flags(true, premultiplied))
    }

    fn gray(bits: u8, data_type: DataType, signed: bool, alpha: AlphaMode) -> IioResult<Self> {
        check_bits(bits)?;
        if !matches!(data_type, DataType::Byte | DataType::UShort | DataType::Short) {
            return Err(IioError::invalid_argument("Bad value for dataType!"));
        }
        if bits as u32 > data_type.bits() {
            return Err(IioError::invalid_argument("Too many bits for dataType!"));
        }
        let direct = (bits == 8 && data_type == DataType::Byte)
            || (bits == 16 && matches!(data_type, DataType::UShort | DataType::Short));
        if direct {
            return Ok(Self::Grayscale(Grayscale {
                bits,
                data_type,
                signed,
                alpha,
                ramp: None,
            }));
        }
        if alpha.has_alpha() {
            return Err(IioError::invalid_argument(
                "gray ramp layouts cannot carry alpha",
            ));
        }
        if data_type == DataType::Short {
            return Err(IioError::invalid_argument(
                "packed gray samples need an unsigned dataType",
            ));
        }
        Ok(Self::Grayscale(Grayscale {
            bits,
            data_type,
            signed,
            alpha,
            ramp: Some(Arc::new(Palette::gray_ramp(bits))),
        }))
    }

    /// A palette layout. Each table must hold exactly `2^bits` entries.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `bits` is not 1, 2, 4, 8 or 16, if
    /// `data_type` is not an integer type, if `bits` exceeds the element
    /// size, if a table has the wrong length, or if a sub-16-bit index is
    /// requested in `Short`.
    pub fn indexed(
        red: &[u8],
        green: &[u8],
        blue: &[u8],
        alpha: Option<&[u8]>,
        bits: u8,
        data_type: DataType,
    ) -> IioResult<Self> {
        check_bits(bits)?;
        if data_type.is_float() {
            return Err(IioError::invalid_argument("Bad value for dataType!"));
        }
        if bits as u32 > data_type.bits() {
            return Err(IioError::invalid_argument("Too many bits for dataType!"));
        }
        if data_type == DataType::Short && bits != 16 {
            return Err(IioError::invalid_argument(
                "packed indices need an unsigned dataType",
            ));
        }
        let len = 1usize << bits;
        if red.len() != len {
            return Err(IioError::invalid_argument("LUT has improper length!"));
        }
        let palette = Palette::new(red, green, blue, alpha)?;
        Ok(Self::Indexed(Indexed {
            palette: Arc::new(palette),
            bits,
            data_type,
        }))
    }

    /// The layout of an existing image.
    ///
    /// Images in a standard layout yield the shared standard instance.
    pub fn from_image(image: &ImageBuffer) -> Self {
        match image.standard_layout() {
            Some(id) => id.layout(),
            None => image.layout().clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Color space of the color components.
    ///
    /// Indexed layouts expand to sRGB.
    pub fn color_space(&self) -> ColorSpace {
        match self {
            Self::Packed(p) => p.color_space,
            Self::Interleaved(i) => i.color_space,
            Self::Banded(b) => b.color_space,
            Self::Grayscale(_) => ColorSpace::Gray,
            Self::Indexed(_) => ColorSpace::Srgb,
        }
    }

    /// Element type of the backing storage.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Packed(p) => p.transfer,
            Self::Interleaved(i) => i.data_type,
            Self::Banded(b) => b.data_type,
            Self::Grayscale(g) => g.data_type,
            Self::Indexed(x) => x.data_type,
        }
    }

    pub fn alpha_mode(&self) -> AlphaMode {
        match self {
            Self::Packed(p) => p.alpha,
            Self::Interleaved(i) => i.alpha,
            Self::Banded(b) => b.alpha,
            Self::Grayscale(g) => g.alpha,
            Self::Indexed(x) => AlphaMode::from_flags(x.palette.has_alpha(), false),
        }
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.alpha_mode().has_alpha()
    }

    /// Number of stored samples per pixel.
    pub fn num_bands(&self) -> usize {
        match self {
            Self::Packed(p) => 3 + (p.masks[3] != 0) as usize,
            Self::Interleaved(i) => i.band_offsets.len(),
            Self::Banded(b) => b.band_offsets.len(),
            Self::Grayscale(g) => 1 + g.alpha.has_alpha() as usize,
            Self::Indexed(_) => 1,
        }
    }

    /// Number of interpreted components per pixel, alpha included.
    ///
    /// Differs from [`num_bands`](Self::num_bands) for palette layouts, where
    /// one stored index expands to several components.
    pub fn num_components(&self) -> usize {
        match self {
            Self::Indexed(x) => 3 + x.palette.has_alpha() as usize,
            _ => self.color_space().num_components() + self.has_alpha() as usize,
        }
    }

    /// Significant bits of band `band`.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `band >= num_bands()`.
    pub fn bits_per_band(&self, band: usize) -> IioResult<u32> {
        if band >= self.num_bands() {
            return Err(IioError::invalid_argument("Band out of range!"));
        }
        Ok(match self {
            Self::Packed(p) => p.masks[band].count_ones(),
            Self::Interleaved(i) => i.data_type.bits(),
            Self::Banded(b) => b.data_type.bits(),
            Self::Grayscale(g) => g.bits as u32,
            Self::Indexed(x) => x.bits as u32,
        })
    }

    /// Color table of indexed and ramp-backed gray layouts.
    pub fn palette(&self) -> Option<&Palette> {
        match self {
            Self::Indexed(x) => Some(&x.palette),
            Self::Grayscale(g) => g.ramp.as_deref(),
            _ => None,
        }
    }

    /// Which standard layout, if any, this layout equals.
    pub fn standard_layout(&self) -> Option<StandardLayout> {
        StandardLayout::ALL
            .into_iter()
            .find(|id| id.matches(self))
    }

    // -----------------------------------------------------------------------
    // Storage
    // -----------------------------------------------------------------------

    /// Storage description for a `width` x `height` image.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if either dimension is zero or the
    /// banks would exceed `i32::MAX` elements.
    pub fn sample_model(&self, width: u32, height: u32) -> IioResult<SampleModel> {
        let w = width as u64;
        let storage = match self {
            Self::Packed(p) => {
                let bands = self.num_bands();
                SampleStorage::SinglePixelPacked {
                    masks: p.masks[..bands].to_vec(),
                }
            }
            Self::Interleaved(i) => {
                let min = i.band_offsets.iter().copied().min().unwrap_or(0);
                let max = i.band_offsets.iter().copied().max().unwrap_or(0);
                let pixel_stride = max - min + 1;
                SampleStorage::PixelInterleaved {
                    pixel_stride,
                    scanline_stride: saturate_u32(pixel_stride as u64 * w),
                    band_offsets: i.band_offsets.iter().map(|o| o - min).collect(),
                }
            }
            Self::Banded(b) => SampleStorage::Banded {
                scanline_stride: width,
                bank_indices: b.bank_indices.clone(),
                band_offsets: b.band_offsets.clone(),
            },
            Self::Grayscale(g) if g.ramp.is_none() => {
                let bands = self.num_bands() as u32;
                SampleStorage::PixelInterleaved {
                    pixel_stride: bands,
                    scanline_stride: saturate_u32(bands as u64 * w),
                    band_offsets: (0..bands).collect(),
                }
            }
            Self::Grayscale(g) => palette_storage(g.bits, width, g.data_type),
            Self::Indexed(x) => palette_storage(x.bits, width, x.data_type),
        };
        SampleModel::new(self.data_type(), width, height, storage)
    }

    /// Allocate a zero-filled image of this layout.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if either dimension is zero, if
    /// `width * height` exceeds `i32::MAX`, or if a backing bank would exceed
    /// `i32::MAX` elements.
    pub fn synthesize(&self, width: u32, height: u32) -> IioResult<ImageBuffer> {
        let model = self.sample_model(width, height)?;
        log::debug!(
            "synthesizing {width}x{height} image: {} banks of {} {} elements",
            model.num_banks(),
            model.bank_len(),
            model.data_type()
        );
        let raster = Raster::new(model)?;
        Ok(ImageBuffer::from_parts(
            self.clone(),
            raster,
            self.standard_layout(),
        ))
    }
}
