//! Feature modes for write parameters and the guard shared by every
//! mode-gated setter.

use core::fmt;

use crate::error::{IioError, IioResult};

/// How a writer decides a feature's settings (tiling, progressive,
/// compression).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum ParamMode {
    /// Feature is off.
    Disabled = 0,
    /// Writer picks its own settings.
    Default = 1,
    /// Caller supplies the settings through the detail setters.
    Explicit = 2,
    /// Settings come from the source's metadata.
    #[default]
    CopyFromMetadata = 3,
}

impl ParamMode {
    pub const ALL: [ParamMode; 4] = [
        Self::Disabled,
        Self::Default,
        Self::Explicit,
        Self::CopyFromMetadata,
    ];
}

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "disabled",
            Self::Default => "default",
            Self::Explicit => "explicit",
            Self::CopyFromMetadata => "copy-from-metadata",
        })
    }
}

/// Fail with [`IioError::InvalidState`] unless `current == required`.
///
/// `feature` names the feature in the message, e.g. `"tiling"`.
pub fn assert_mode(current: ParamMode, required: ParamMode, feature: &str) -> IioResult<()> {
    if current == required {
        Ok(())
    } else {
        Err(IioError::invalid_state(alloc::format!(
            "{feature} mode is {current}, not {required}"
        )))
    }
}

/// Fail with [`IioError::UnsupportedOperation`] unless `supported`.
pub fn require_capability(supported: bool, message: &'static str) -> IioResult<()> {
    if supported {
        Ok(())
    } else {
        Err(IioError::unsupported(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn default_is_copy_from_metadata() {
        assert_eq!(ParamMode::default(), ParamMode::CopyFromMetadata);
    }

    #[test]
    fn guard_accepts_only_required_mode() {
        for mode in ParamMode::ALL {
            let res = assert_mode(mode, ParamMode::Explicit, "tiling");
            assert_eq!(res.is_ok(), mode == ParamMode::Explicit);
        }
        let err = assert_mode(ParamMode::Default, ParamMode::Explicit, "compression").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid state: compression mode is default, not explicit"
        );
    }

    #[test]
    fn capability_guard() {
        assert!(require_capability(true, "Tiling not supported!").is_ok());
        let err = require_capability(false, "Tiling not supported!").unwrap_err();
        assert!(matches!(err, IioError::UnsupportedOperation(_)));
    }
}
