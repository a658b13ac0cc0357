//! Element types backing pixel storage.

use core::fmt;

/// Storage type of a single sample element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DataType {
    /// Unsigned 8-bit integer.
    Byte = 0,
    /// Unsigned 16-bit integer.
    UShort = 1,
    /// Signed 16-bit integer.
    Short = 2,
    /// Signed 32-bit integer. Packed layouts treat it as 32 raw bits.
    Int = 3,
    /// 32-bit floating point.
    Float = 4,
    /// 64-bit floating point.
    Double = 5,
}

impl DataType {
    /// All element types, in declaration order.
    pub const ALL: [DataType; 6] = [
        DataType::Byte,
        DataType::UShort,
        DataType::Short,
        DataType::Int,
        DataType::Float,
        DataType::Double,
    ];

    /// Width of one element in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Byte => 8,
            Self::UShort | Self::Short => 16,
            Self::Int | Self::Float => 32,
            Self::Double => 64,
        }
    }

    /// Width of one element in bytes.
    #[inline]
    pub const fn byte_size(self) -> usize {
        self.bits() as usize / 8
    }

    /// Whether the element is a signed integer or floating point.
    #[inline]
    pub const fn is_signed(self) -> bool {
        !matches!(self, Self::Byte | Self::UShort)
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Whether several sub-element samples can be packed into one element.
    ///
    /// Bit-packed storage needs an unsigned integer container.
    #[inline]
    pub const fn can_pack_bits(self) -> bool {
        matches!(self, Self::Byte | Self::UShort | Self::Int)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Byte => "byte",
            Self::UShort => "ushort",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
        })
    }
}
