//! Band subset validation.

use crate::error::{IioError, IioResult};

/// Check that a source/destination band mapping is consistent.
///
/// A missing subset means "all bands". The effective subsets must have the
/// same length, and every listed index must name an existing band.
///
/// # Errors
///
/// [`IioError::InvalidArgument`] on a length mismatch or an out-of-range
/// index.
pub fn check_band_settings(
    source_bands: Option<&[u32]>,
    dest_bands: Option<&[u32]>,
    num_src_bands: usize,
    num_dest_bands: usize,
) -> IioResult<()> {
    let src_len = source_bands.map_or(num_src_bands, <[u32]>::len);
    let dest_len = dest_bands.map_or(num_dest_bands, <[u32]>::len);
    if src_len != dest_len {
        return Err(IioError::invalid_argument(
            "num source & dest bands differ!",
        ));
    }
    if source_bands.is_some_and(|b| out_of_range(b, num_src_bands)) {
        return Err(IioError::invalid_argument(
            "source bands contain a value >= the number of source bands!",
        ));
    }
    if dest_bands.is_some_and(|b| out_of_range(b, num_dest_bands)) {
        return Err(IioError::invalid_argument(
            "destination bands contain a value >= the number of destination bands!",
        ));
    }
    Ok(())
}

fn out_of_range(bands: &[u32], count: usize) -> bool {
    bands.iter().any(|&b| b as usize >= count)
}

/// Assignment-time rule for a band subset: no index may repeat.
///
/// # Errors
///
/// [`IioError::InvalidArgument`] if an index appears twice.
pub fn validate_band_subset(bands: &[u32]) -> IioResult<()> {
    for (i, band) in bands.iter().enumerate() {
        if bands[i + 1..].contains(band) {
            return Err(IioError::invalid_argument("Duplicate band value!"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_rejected() {
        let err = check_band_settings(Some(&[0, 1]), Some(&[0]), 4, 4).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        // Implicit "all bands" counts too.
        assert!(check_band_settings(None, None, 3, 4).is_err());
        assert!(check_band_settings(Some(&[0, 1, 2]), None, 3, 4).is_err());
        assert!(check_band_settings(Some(&[0, 1, 2]), None, 3, 3).is_ok());
    }

    #[test]
    fn out_of_range_index_rejected() {
        let err = check_band_settings(Some(&[5]), None, 4, 4).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let err = check_band_settings(Some(&[5]), Some(&[0]), 4, 4).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        let err = check_band_settings(Some(&[0]), Some(&[1]), 4, 1).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
    }

    #[test]
    fn valid_mappings_pass() {
        assert!(check_band_settings(None, None, 4, 4).is_ok());
        assert!(check_band_settings(Some(&[3, 0]), Some(&[1, 0]), 4, 2).is_ok());
        assert!(check_band_settings(Some(&[]), Some(&[]), 4, 2).is_ok());
    }

    #[test]
    fn duplicates_rejected() {
        assert!(validate_band_subset(&[0, 1, 2]).is_ok());
        assert!(validate_band_subset(&[]).is_ok());
        let err = validate_band_subset(&[0, 1, 1]).unwrap_err();
        assert!(matches!(err, IioError::InvalidArgument(_)));
        assert!(validate_band_subset(&[7, 3, 7]).is_err());
    }
}
