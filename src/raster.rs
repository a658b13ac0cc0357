//! Sample storage: how samples map to elements, and the elements themselves.
//!
//! A [`SampleModel`] is the size-specific form of a layout's storage
//! description. [`Raster`] pairs a model with a zero-initialized
//! [`DataBuffer`] and offers per-sample access for any storage family.

use alloc::vec;
use alloc::vec::Vec;

use crate::data_type::DataType;
use crate::error::{IioError, IioResult};

/// Largest element count a single bank or image may hold.
pub const MAX_ELEMENTS: u64 = i32::MAX as u64;

// ---------------------------------------------------------------------------
// SampleModel
// ---------------------------------------------------------------------------

/// How samples are arranged in the backing banks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SampleStorage {
    /// One element per pixel; band `i` is selected by `masks[i]`.
    SinglePixelPacked { masks: Vec<u32> },
    /// One element per sample, pixels interleaved in a single bank.
    PixelInterleaved {
        pixel_stride: u32,
        scanline_stride: u32,
        band_offsets: Vec<u32>,
    },
    /// One element per sample; each band lives in `bank_indices[i]` at
    /// `band_offsets[i]`.
    Banded {
        scanline_stride: u32,
        bank_indices: Vec<u32>,
        band_offsets: Vec<u32>,
    },
    /// Several single-band pixels packed most-significant-bits first into
    /// each element.
    MultiPixelPacked { bits: u8, scanline_stride: u32 },
}

/// Storage description for an image of a specific size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SampleModel {
    data_type: DataType,
    width: u32,
    height: u32,
    storage: SampleStorage,
}

impl SampleModel {
    /// Create a sample model, checking that its storage is consistent and
    /// its banks are addressable.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if either dimension is zero, if
    /// `width * height` exceeds `i32::MAX`, if the storage description is
    /// malformed (see [`SampleStorage`]), or if the banks together would need
    /// more than `i32::MAX` elements.
    pub fn new(
        data_type: DataType,
        width: u32,
        height: u32,
        storage: SampleStorage,
    ) -> IioResult<Self> {
        if width == 0 || height == 0 {
            return Err(IioError::invalid_argument(
                "width and height must be positive",
            ));
        }
        if width as u64 * height as u64 > MAX_ELEMENTS {
            return Err(IioError::invalid_argument("width*height > i32::MAX"));
        }
        check_storage(data_type, width, &storage)?;
        let model = Self {
            data_type,
            width,
            height,
            storage,
        };
        let total = model
            .required_bank_len()
            .and_then(|len| len.checked_mul(model.bank_count()));
        match total {
            Some(n) if n <= MAX_ELEMENTS => Ok(model),
            _ => Err(IioError::invalid_argument("backing array size > i32::MAX")),
        }
    }

    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn storage(&self) -> &SampleStorage {
        &self.storage
    }

    /// Number of bands (samples per pixel).
    pub fn num_bands(&self) -> usize {
        match &self.storage {
            SampleStorage::SinglePixelPacked { masks } => masks.len(),
            SampleStorage::PixelInterleaved { band_offsets, .. } => band_offsets.len(),
            SampleStorage::Banded { band_offsets, .. } => band_offsets.len(),
            SampleStorage::MultiPixelPacked { .. } => 1,
        }
    }

    /// Number of backing banks. Bounded by construction.
    pub fn num_banks(&self) -> usize {
        self.bank_count() as usize
    }

    fn bank_count(&self) -> u64 {
        match &self.storage {
            SampleStorage::Banded { bank_indices, .. } => bank_indices
                .iter()
                .max()
                .map_or(1, |&max| max as u64 + 1),
            _ => 1,
        }
    }

    /// Elements per bank. Valid because construction bounded it.
    pub fn bank_len(&self) -> usize {
        self.required_bank_len().unwrap_or(0) as usize
    }

    /// Significant bits of `band`, or `None` if out of range.
    pub fn sample_size(&self, band: usize) -> Option<u32> {
        if band >= self.num_bands() {
            return None;
        }
        Some(match &self.storage {
            SampleStorage::SinglePixelPacked { masks } => masks[band].count_ones(),
            SampleStorage::MultiPixelPacked { bits, .. } => *bits as u32,
            _ => self.data_type.bits(),
        })
    }

    fn required_bank_len(&self) -> Option<u64> {
        let w = self.width as u64;
        let h = self.height as u64;
        match &self.storage {
            SampleStorage::SinglePixelPacked { .. } => w.checked_mul(h),
            SampleStorage::PixelInterleaved {
                pixel_stride,
                scanline_stride,
                band_offsets,
            } => {
                let max_off = band_offsets.iter().copied().max().unwrap_or(0) as u64;
                let rows = (h - 1).checked_mul(*scanline_stride as u64)?;
                let cols = (w - 1).checked_mul(*pixel_stride as u64)?;
                max_off.checked_add(rows)?.checked_add(cols)?.checked_add(1)
            }
            SampleStorage::Banded {
                scanline_stride,
                band_offsets,
                ..
            } => {
                let max_off = band_offsets.iter().copied().max().unwrap_or(0) as u64;
                let rows = (h - 1).checked_mul(*scanline_stride as u64)?;
                max_off.checked_add(rows)?.checked_add(w)
            }
            SampleStorage::MultiPixelPacked {
                scanline_stride, ..
            } => (*scanline_stride as u64).checked_mul(h),
        }
    }

    /// Where sample `(x, y, band)` lives.
    fn locate(&self, x: u32, y: u32, band: usize) -> IioResult<Location> {
        if x >= self.width || y >= self.height {
            return Err(IioError::invalid_argument("coordinate out of bounds"));
        }
        if band >= self.num_bands() {
            return Err(IioError::invalid_argument("band index out of range"));
        }
        let (x, y) = (x as usize, y as usize);
        Ok(match &self.storage {
            SampleStorage::SinglePixelPacked { masks } => Location::Bits {
                bank: 0,
                index: y * self.width as usize + x,
                mask: masks[band],
                shift: masks[band].trailing_zeros() % 32,
            },
            SampleStorage::PixelInterleaved {
                pixel_stride,
                scanline_stride,
                band_offsets,
            } => Location::Element {
                bank: 0,
                index: y * *scanline_stride as usize
                    + x * *pixel_stride as usize
                    + band_offsets[band] as usize,
            },
            SampleStorage::Banded {
                scanline_stride,
                bank_indices,
                band_offsets,
            } => Location::Element {
                bank: bank_indices[band] as usize,
                index: band_offsets[band] as usize + y * *scanline_stride as usize + x,
            },
            SampleStorage::MultiPixelPacked {
                bits,
                scanline_stride,
            } => {
                let elem_bits = self.data_type.bits() as usize;
                let bit = x * *bits as usize;
                let field = (1u32 << *bits) - 1;
                let shift = (elem_bits - *bits as usize - bit % elem_bits) as u32;
                Location::Bits {
                    bank: 0,
                    index: y * *scanline_stride as usize + bit / elem_bits,
                    mask: field << shift,
                    shift,
                }
            }
        })
    }
}

fn check_storage(data_type: DataType, width: u32, storage: &SampleStorage) -> IioResult<()> {
    match storage {
        SampleStorage::SinglePixelPacked { masks } => {
            if masks.is_empty() {
                return Err(IioError::invalid_argument("packed storage needs a mask"));
            }
            if !data_type.can_pack_bits() {
                return Err(IioError::invalid_argument(
                    "packed storage needs an unsigned integer type",
                ));
            }
            let bits = data_type.bits();
            if bits < 32 && masks.iter().any(|m| m >> bits != 0) {
                return Err(IioError::invalid_argument("mask wider than data type"));
            }
        }
        SampleStorage::PixelInterleaved {
            pixel_stride,
            band_offsets,
            ..
        } => {
            if band_offsets.is_empty() {
                return Err(IioError::invalid_argument("no band offsets"));
            }
            if *pixel_stride == 0 {
                return Err(IioError::invalid_argument("pixel stride must be positive"));
            }
        }
        SampleStorage::Banded {
            bank_indices,
            band_offsets,
            ..
        } => {
            if band_offsets.is_empty() {
                return Err(IioError::invalid_argument("no band offsets"));
            }
            if bank_indices.len() != band_offsets.len() {
                return Err(IioError::invalid_argument(
                    "bank_indices.length != band_offsets.length",
                ));
            }
        }
        SampleStorage::MultiPixelPacked {
            bits,
            scanline_stride,
        } => {
            if !data_type.can_pack_bits() {
                return Err(IioError::invalid_argument(
                    "packed storage needs an unsigned integer type",
                ));
            }
            let elem_bits = data_type.bits();
            if !matches!(*bits, 1 | 2 | 4 | 8 | 16) || *bits as u32 > elem_bits {
                return Err(IioError::invalid_argument(
                    "bits per pixel must be 1, 2, 4, 8 or 16 and fit the element",
                ));
            }
            if (*scanline_stride as u64) * (elem_bits as u64) < width as u64 * *bits as u64 {
                return Err(IioError::invalid_argument("scanline stride too short"));
            }
        }
    }
    Ok(())
}

enum Location {
    Element {
        bank: usize,
        index: usize,
    },
    Bits {
        bank: usize,
        index: usize,
        mask: u32,
        shift: u32,
    },
}

// ---------------------------------------------------------------------------
// DataBuffer
// ---------------------------------------------------------------------------

/// Backing banks, one `Vec` per bank.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DataBuffer {
    Byte(Vec<Vec<u8>>),
    UShort(Vec<Vec<u16>>),
    Short(Vec<Vec<i16>>),
    Int(Vec<Vec<i32>>),
    Float(Vec<Vec<f32>>),
    Double(Vec<Vec<f64>>),
}

macro_rules! zeroed_banks {
    ($t:ty, $banks:expr, $len:expr) => {{
        let mut out = Vec::new();
        out.try_reserve_exact($banks)
            .map_err(|_| IioError::invalid_argument("cannot allocate backing array"))?;
        for _ in 0..$banks {
            let mut bank: Vec<$t> = Vec::new();
            bank.try_reserve_exact($len)
                .map_err(|_| IioError::invalid_argument("cannot allocate backing array"))?;
            bank.resize($len, <$t>::default());
            out.push(bank);
        }
        out
    }};
}

impl DataBuffer {
    fn zeroed(data_type: DataType, banks: usize, len: usize) -> IioResult<Self> {
        Ok(match data_type {
            DataType::Byte => Self::Byte(zeroed_banks!(u8, banks, len)),
            DataType::UShort => Self::UShort(zeroed_banks!(u16, banks, len)),
            DataType::Short => Self::Short(zeroed_banks!(i16, banks, len)),
            DataType::Int => Self::Int(zeroed_banks!(i32, banks, len)),
            DataType::Float => Self::Float(zeroed_banks!(f32, banks, len)),
            DataType::Double => Self::Double(zeroed_banks!(f64, banks, len)),
        })
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Self::Byte(_) => DataType::Byte,
            Self::UShort(_) => DataType::UShort,
            Self::Short(_) => DataType::Short,
            Self::Int(_) => DataType::Int,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
        }
    }

    pub fn num_banks(&self) -> usize {
        match self {
            Self::Byte(b) => b.len(),
            Self::UShort(b) => b.len(),
            Self::Short(b) => b.len(),
            Self::Int(b) => b.len(),
            Self::Float(b) => b.len(),
            Self::Double(b) => b.len(),
        }
    }

    /// Length of bank `bank`, or `None` if there is no such bank.
    pub fn bank_len(&self, bank: usize) -> Option<usize> {
        match self {
            Self::Byte(b) => b.get(bank).map(Vec::len),
            Self::UShort(b) => b.get(bank).map(Vec::len),
            Self::Short(b) => b.get(bank).map(Vec::len),
            Self::Int(b) => b.get(bank).map(Vec::len),
            Self::Float(b) => b.get(bank).map(Vec::len),
            Self::Double(b) => b.get(bank).map(Vec::len),
        }
    }

    /// Raw element bits; only meaningful for integer banks.
    fn bits(&self, bank: usize, index: usize) -> u32 {
        match self {
            Self::Byte(b) => b[bank][index] as u32,
            Self::UShort(b) => b[bank][index] as u32,
            Self::Short(b) => b[bank][index] as u16 as u32,
            Self::Int(b) => b[bank][index] as u32,
            Self::Float(b) => b[bank][index].to_bits(),
            Self::Double(b) => b[bank][index] as u32,
        }
    }

    fn set_bits(&mut self, bank: usize, index: usize, v: u32) {
        match self {
            Self::Byte(b) => b[bank][index] = v as u8,
            Self::UShort(b) => b[bank][index] = v as u16,
            Self::Short(b) => b[bank][index] = v as u16 as i16,
            Self::Int(b) => b[bank][index] = v as i32,
            Self::Float(b) => b[bank][index] = f32::from_bits(v),
            Self::Double(b) => b[bank][index] = v as f64,
        }
    }

    fn value(&self, bank: usize, index: usize) -> f64 {
        match self {
            Self::Byte(b) => b[bank][index] as f64,
            Self::UShort(b) => b[bank][index] as f64,
            Self::Short(b) => b[bank][index] as f64,
            Self::Int(b) => b[bank][index] as f64,
            Self::Float(b) => b[bank][index] as f64,
            Self::Double(b) => b[bank][index],
        }
    }

    // Float-to-int `as` casts saturate.
    fn set_value(&mut self, bank: usize, index: usize, v: f64) {
        match self {
            Self::Byte(b) => b[bank][index] = v as u8,
            Self::UShort(b) => b[bank][index] = v as u16,
            Self::Short(b) => b[bank][index] = v as i16,
            Self::Int(b) => b[bank][index] = v as i32,
            Self::Float(b) => b[bank][index] = v as f32,
            Self::Double(b) => b[bank][index] = v,
        }
    }
}

// ---------------------------------------------------------------------------
// Raster
// ---------------------------------------------------------------------------

/// A rectangle of samples: a [`SampleModel`] plus its [`DataBuffer`].
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    model: SampleModel,
    data: DataBuffer,
}

impl Raster {
    /// Allocate a zero-filled raster for `model`.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if the backing banks cannot be
    /// allocated.
    pub fn new(model: SampleModel) -> IioResult<Self> {
        let data = DataBuffer::zeroed(model.data_type, model.num_banks(), model.bank_len())?;
        Ok(Self { model, data })
    }

    /// Wrap existing banks.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if the buffer's element type, bank
    /// count, or bank lengths do not satisfy `model`.
    pub fn from_parts(model: SampleModel, data: DataBuffer) -> IioResult<Self> {
        if data.data_type() != model.data_type {
            return Err(IioError::invalid_argument(
                "data buffer type does not match sample model",
            ));
        }
        if data.num_banks() < model.num_banks() {
            return Err(IioError::invalid_argument("too few banks for sample model"));
        }
        let need = model.bank_len();
        if (0..model.num_banks()).any(|b| data.bank_len(b).unwrap_or(0) < need) {
            return Err(IioError::invalid_argument("bank too small for sample model"));
        }
        Ok(Self { model, data })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.model.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.model.height
    }

    #[inline]
    pub fn num_bands(&self) -> usize {
        self.model.num_bands()
    }

    pub fn sample_model(&self) -> &SampleModel {
        &self.model
    }

    pub fn data(&self) -> &DataBuffer {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataBuffer {
        &mut self.data
    }

    pub fn into_data(self) -> DataBuffer {
        self.data
    }

    /// Read one sample.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `(x, y)` or `band` is out of range.
    pub fn sample(&self, x: u32, y: u32, band: usize) -> IioResult<f64> {
        Ok(match self.model.locate(x, y, band)? {
            Location::Element { bank, index } => self.data.value(bank, index),
            Location::Bits {
                bank,
                index,
                mask,
                shift,
            } => ((self.data.bits(bank, index) & mask) >> shift) as f64,
        })
    }

    /// Write one sample. Integer storage saturates out-of-range values;
    /// bit-packed storage keeps the low bits that fit the field.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if `(x, y)` or `band` is out of range.
    pub fn set_sample(&mut self, x: u32, y: u32, band: usize, value: f64) -> IioResult<()> {
        match self.model.locate(x, y, band)? {
            Location::Element { bank, index } => self.data.set_value(bank, index, value),
            Location::Bits {
                bank,
                index,
                mask,
                shift,
            } => {
                let old = self.data.bits(bank, index);
                let field = (value as u32).wrapping_shl(shift) & mask;
                self.data.set_bits(bank, index, (old & !mask) | field);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interleaved_rgb(w: u32, h: u32) -> SampleModel {
        SampleModel::new(
            DataType::Byte,
            w,
            h,
            SampleStorage::PixelInterleaved {
                pixel_stride: 3,
                scanline_stride: 3 * w,
                band_offsets: vec![2, 1, 0],
            },
        )
        .unwrap()
    }

    #[test]
    fn interleaved_bank_len() {
        let m = interleaved_rgb(4, 2);
        assert_eq!(m.bank_len(), 24);
        assert_eq!(m.num_banks(), 1);
        assert_eq!(m.num_bands(), 3);
        assert_eq!(m.sample_size(0), Some(8));
        assert_eq!(m.sample_size(3), None);
    }

    #[test]
    fn interleaved_offsets_select_elements() {
        let mut r = Raster::new(interleaved_rgb(2, 2)).unwrap();
        r.set_sample(1, 1, 0, 200.0).unwrap();
        // band 0 at offset 2 of pixel (1,1): 1*6 + 1*3 + 2
        match r.data() {
            DataBuffer::Byte(banks) => assert_eq!(banks[0][11], 200),
            other => panic!("unexpected buffer {other:?}"),
        }
        assert_eq!(r.sample(1, 1, 0).unwrap(), 200.0);
        assert_eq!(r.sample(0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn packed_masks_isolate_fields() {
        let model = SampleModel::new(
            DataType::Int,
            2,
            1,
            SampleStorage::SinglePixelPacked {
                masks: vec![0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000],
            },
        )
        .unwrap();
        let mut r = Raster::new(model).unwrap();
        r.set_sample(0, 0, 0, 0x12 as f64).unwrap();
        r.set_sample(0, 0, 3, 0xFF as f64).unwrap();
        r.set_sample(0, 0, 2, 0x34 as f64).unwrap();
        assert_eq!(r.sample(0, 0, 0).unwrap(), 0x12 as f64);
        assert_eq!(r.sample(0, 0, 1).unwrap(), 0.0);
        assert_eq!(r.sample(0, 0, 2).unwrap(), 0x34 as f64);
        assert_eq!(r.sample(0, 0, 3).unwrap(), 255.0);
        match r.data() {
            DataBuffer::Int(banks) => assert_eq!(banks[0][0] as u32, 0xFF12_0034),
            other => panic!("unexpected buffer {other:?}"),
        }
    }

    #[test]
    fn multi_pixel_packed_is_msb_first() {
        let model = SampleModel::new(
            DataType::Byte,
            10,
            2,
            SampleStorage::MultiPixelPacked {
                bits: 1,
                scanline_stride: 2,
            },
        )
        .unwrap();
        assert_eq!(model.bank_len(), 4);
        let mut r = Raster::new(model).unwrap();
        r.set_sample(0, 0, 0, 1.0).unwrap();
        r.set_sample(9, 1, 0, 1.0).unwrap();
        match r.data() {
            DataBuffer::Byte(banks) => assert_eq!(banks[0], vec![0x80, 0x00, 0x00, 0x40]),
            other => panic!("unexpected buffer {other:?}"),
        }
        assert_eq!(r.sample(9, 1, 0).unwrap(), 1.0);
        assert_eq!(r.sample(8, 1, 0).unwrap(), 0.0);
    }

    #[test]
    fn banded_uses_separate_banks() {
        let model = SampleModel::new(
            DataType::UShort,
            3,
            3,
            SampleStorage::Banded {
                scanline_stride: 3,
                bank_indices: vec![0, 1, 2],
                band_offsets: vec![0, 0, 0],
            },
        )
        .unwrap();
        let mut r = Raster::new(model).unwrap();
        assert_eq!(r.data().num_banks(), 3);
        r.set_sample(2, 2, 1, 65535.0).unwrap();
        match r.data() {
            DataBuffer::UShort(banks) => {
                assert_eq!(banks[1][8], 65535);
                assert_eq!(banks[0][8], 0);
            }
            other => panic!("unexpected buffer {other:?}"),
        }
    }

    #[test]
    fn out_of_range_access_rejected() {
        let r = Raster::new(interleaved_rgb(2, 2)).unwrap();
        assert!(matches!(
            r.sample(2, 0, 0),
            Err(IioError::InvalidArgument(_))
        ));
        assert!(matches!(
            r.sample(0, 0, 3),
            Err(IioError::InvalidArgument(_))
        ));
    }

    #[test]
    fn oversized_models_rejected_before_allocation() {
        let err = SampleModel::new(
            DataType::Byte,
            70_000,
            70_000,
            SampleStorage::SinglePixelPacked { masks: vec![0xFF] },
        )
        .unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));

        // width*height fits, but four samples per pixel do not.
        let err = SampleModel::new(
            DataType::Byte,
            46_340,
            46_340,
            SampleStorage::PixelInterleaved {
                pixel_stride: 4,
                scanline_stride: 4 * 46_340,
                band_offsets: vec![0, 1, 2, 3],
            },
        )
        .unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));

        let err = SampleModel::new(
            DataType::Byte,
            0,
            10,
            SampleStorage::SinglePixelPacked { masks: vec![0xFF] },
        )
        .unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
    }

    fn rejects(data_type: DataType, width: u32, storage: SampleStorage) {
        let err = SampleModel::new(data_type, width, 2, storage).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)), "{err}");
    }

    #[test]
    fn bank_count_counts_toward_size_limit() {
        rejects(
            DataType::Byte,
            1,
            SampleStorage::Banded {
                scanline_stride: 1,
                bank_indices: vec![0, 1, u32::MAX],
                band_offsets: vec![0, 0, 0],
            },
        );
        // each bank fits, all of them together do not
        rejects(
            DataType::Byte,
            40_000,
            SampleStorage::Banded {
                scanline_stride: 40_000,
                bank_indices: vec![0, 30_000],
                band_offsets: vec![0, 0],
            },
        );
    }

    #[test]
    fn banded_arrays_must_agree() {
        rejects(
            DataType::Byte,
            2,
            SampleStorage::Banded {
                scanline_stride: 2,
                bank_indices: vec![0],
                band_offsets: vec![0, 0, 0],
            },
        );
        rejects(
            DataType::Byte,
            2,
            SampleStorage::Banded {
                scanline_stride: 2,
                bank_indices: vec![],
                band_offsets: vec![],
            },
        );
    }

    #[test]
    fn multi_pixel_bits_must_divide_element() {
        for bits in [0, 3, 5, 32] {
            rejects(
                DataType::Byte,
                4,
                SampleStorage::MultiPixelPacked {
                    bits,
                    scanline_stride: 8,
                },
            );
        }
        rejects(
            DataType::Byte,
            4,
            SampleStorage::MultiPixelPacked {
                bits: 16,
                scanline_stride: 8,
            },
        );
        rejects(
            DataType::Float,
            4,
            SampleStorage::MultiPixelPacked {
                bits: 1,
                scanline_stride: 1,
            },
        );
        // 9 one-bit pixels do not fit a one-byte row
        rejects(
            DataType::Byte,
            9,
            SampleStorage::MultiPixelPacked {
                bits: 1,
                scanline_stride: 1,
            },
        );
        let model = SampleModel::new(
            DataType::UShort,
            3,
            2,
            SampleStorage::MultiPixelPacked {
                bits: 4,
                scanline_stride: 1,
            },
        )
        .unwrap();
        let mut r = Raster::new(model).unwrap();
        r.set_sample(2, 1, 0, 9.0).unwrap();
        assert_eq!(r.sample(2, 1, 0).unwrap(), 9.0);
    }

    #[test]
    fn packed_masks_must_fit_integer_element() {
        rejects(DataType::Int, 2, SampleStorage::SinglePixelPacked { masks: vec![] });
        rejects(
            DataType::Byte,
            2,
            SampleStorage::SinglePixelPacked { masks: vec![0x0F00] },
        );
        rejects(
            DataType::Double,
            2,
            SampleStorage::SinglePixelPacked { masks: vec![0xFF] },
        );
        rejects(
            DataType::Short,
            2,
            SampleStorage::SinglePixelPacked { masks: vec![0xFF] },
        );
    }

    #[test]
    fn interleaved_needs_stride_and_bands() {
        rejects(
            DataType::Byte,
            2,
            SampleStorage::PixelInterleaved {
                pixel_stride: 0,
                scanline_stride: 2,
                band_offsets: vec![0],
            },
        );
        rejects(
            DataType::Byte,
            2,
            SampleStorage::PixelInterleaved {
                pixel_stride: 1,
                scanline_stride: 2,
                band_offsets: vec![],
            },
        );
    }

    #[test]
    fn from_parts_validates_banks() {
        let model = interleaved_rgb(2, 1);
        let err = Raster::from_parts(model.clone(), DataBuffer::Byte(vec![vec![0; 5]])).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let err = Raster::from_parts(model.clone(), DataBuffer::UShort(vec![vec![0; 6]])).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let r = Raster::from_parts(model, DataBuffer::Byte(vec![vec![7; 6]])).unwrap();
        assert_eq!(r.sample(1, 0, 2).unwrap(), 7.0);
    }
}
