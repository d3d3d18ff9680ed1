use std::fmt;

use serde::{Deserialize, Serialize};

use roc_sys::{roc_version, roc_version_load};

use crate::models::error::RocError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemanticVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Same major version, and same minor while the major is 0.
    pub fn is_compatible_with(&self, other: &SemanticVersion) -> bool {
        self.major == other.major && (self.major != 0 || self.minor == other.minor)
    }
}

impl From<roc_version> for SemanticVersion {
    fn from(v: roc_version) -> Self {
        Self::new(v.major, v.minor, v.patch)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Versions of the loaded native library and of these bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    pub native: SemanticVersion,
    pub bindings: SemanticVersion,
}

impl Versions {
    pub fn validate(&self) -> Result<(), RocError> {
        if self.native.is_compatible_with(&self.bindings) {
            return Ok(());
        }
        Err(RocError::IncompatibleVersion {
            native: self.native.to_string(),
            bindings: self.bindings.to_string(),
        })
    }
}

pub fn bindings_version() -> SemanticVersion {
    let part = |s: &str| s.parse().unwrap_or(0);
    SemanticVersion::new(
        part(env!("CARGO_PKG_VERSION_MAJOR")),
        part(env!("CARGO_PKG_VERSION_MINOR")),
        part(env!("CARGO_PKG_VERSION_PATCH")),
    )
}

pub fn version() -> Versions {
    let mut native = roc_version::default();
    unsafe { roc_version_load(&mut native) };

    Versions {
        native: native.into(),
        bindings: bindings_version(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_engine_is_compatible() {
        let versions = version();
        assert_eq!(versions.bindings, bindings_version());
        versions.validate().unwrap();
    }

    #[test]
    fn compatibility_rules() {
        let v = SemanticVersion::new;

        assert!(v(1, 2, 3).is_compatible_with(&v(1, 0, 0)));
        assert!(!v(2, 0, 0).is_compatible_with(&v(1, 9, 0)));
        assert!(v(0, 6, 1).is_compatible_with(&v(0, 6, 0)));
        assert!(!v(0, 7, 0).is_compatible_with(&v(0, 6, 0)));
    }

    #[test]
    fn mismatch_is_reported() {
        let versions = Versions {
            native: SemanticVersion::new(0, 5, 0),
            bindings: SemanticVersion::new(0, 6, 2),
        };

        assert_eq!(
            versions.validate(),
            Err(RocError::IncompatibleVersion {
                native: "0.5.0".into(),
                bindings: "0.6.2".into(),
            })
        );
    }
}
