//! Color lookup tables for indexed layouts.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use rgb::Rgba;

use crate::error::{IioError, IioResult};

/// An immutable color lookup table.
///
/// Entries are stored as [`Rgba<u8>`]. A table built without an alpha LUT,
/// or whose alpha LUT is fully opaque, reports `has_alpha() == false`, so two
/// tables describing the same colors compare equal regardless of how the
/// caller spelled opacity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgba<u8>>,
    has_alpha: bool,
}

impl Palette {
    /// Build a palette from separate component tables.
    ///
    /// # Errors
    ///
    /// [`IioError::InvalidArgument`] if the tables are empty or differ in
    /// length.
    pub fn new(red: &[u8], green: &[u8], blue: &[u8], alpha: Option<&[u8]>) -> IioResult<Self> {
        let len = red.len();
        if len == 0 {
            return Err(IioError::invalid_argument("LUT is empty!"));
        }
        if green.len() != len || blue.len() != len || alpha.is_some_and(|a| a.len() != len) {
            return Err(IioError::invalid_argument("LUT has improper length!"));
        }
        let entries = (0..len)
            .map(|i| Rgba {
                r: red[i],
                g: green[i],
                b: blue[i],
                a: alpha.map_or(u8::MAX, |a| a[i]),
            })
            .collect();
        Ok(Self::from_entries(entries))
    }

    pub(crate) fn from_entries(entries: Vec<Rgba<u8>>) -> Self {
        let has_alpha = entries.iter().any(|e| e.a != u8::MAX);
        Self { entries, has_alpha }
    }

    /// Linear gray ramp with `2^bits` levels from black to white.
    pub(crate) fn gray_ramp(bits: u8) -> Self {
        let count = 1usize << bits;
        let max = count - 1;
        let entries = (0..count)
            .map(|i| {
                let v = (i * 255 / max) as u8;
                Rgba {
                    r: v,
                    g: v,
                    b: v,
                    a: u8::MAX,
                }
            })
            .collect();
        Self {
            entries,
            has_alpha: false,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; palettes have at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry is not fully opaque.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn entries(&self) -> &[Rgba<u8>] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<Rgba<u8>> {
        self.entries.get(index).copied()
    }

    /// Red component table.
    pub fn red(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.r).collect()
    }

    /// Green component table.
    pub fn green(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.g).collect()
    }

    /// Blue component table.
    pub fn blue(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.b).collect()
    }

    /// Alpha table; all `255` for opaque palettes.
    pub fn alpha(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.a).collect()
    }
}

impl Hash for Palette {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entries.len().hash(state);
        for e in &self.entries {
            [e.r, e.g, e.b, e.a].hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn tables_round_trip() {
        let r = [0u8, 10, 20, 30];
        let g = [1u8, 11, 21, 31];
        let b = [2u8, 12, 22, 32];
        let p = Palette::new(&r, &g, &b, None).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(p.red(), r);
        assert_eq!(p.green(), g);
        assert_eq!(p.blue(), b);
        assert_eq!(p.alpha(), vec![255; 4]);
        assert!(!p.has_alpha());
    }

    #[test]
    fn opaque_alpha_equals_no_alpha() {
        let t = [0u8, 255];
        let with = Palette::new(&t, &t, &t, Some(&[255, 255])).unwrap();
        let without = Palette::new(&t, &t, &t, None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn translucent_entry_sets_alpha() {
        let t = [0u8, 255];
        let p = Palette::new(&t, &t, &t, Some(&[0, 255])).unwrap();
        assert!(p.has_alpha());
        assert_eq!(p.entry(0).map(|e| e.a), Some(0));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let err = Palette::new(&[0, 1], &[0], &[0, 1], None).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let err = Palette::new(&[0, 1], &[0, 1], &[0, 1], Some(&[0])).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let err = Palette::new(&[], &[], &[], None).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
    }

    #[test]
    fn gray_ramp_levels() {
        let p = Palette::gray_ramp(2);
        assert_eq!(p.red(), vec![0, 85, 170, 255]);
        assert_eq!(Palette::gray_ramp(1).blue(), vec![0, 255]);
        assert_eq!(Palette::gray_ramp(8).len(), 256);
    }
}
