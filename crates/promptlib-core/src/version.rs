//! Strict document version parsing and range matching
//!
//! Document versions are plain `MAJOR.MINOR.PATCH` triples of ASCII digits.
//! There is no `v` prefix, pre-release, or build metadata.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Version of a prompt document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl DocumentVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string
    pub fn parse(version_str: &str) -> Result<Self, VersionError> {
        let parts: Vec<&str> = version_str.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat(format!(
                "expected MAJOR.MINOR.PATCH, got '{}'",
                version_str
            )));
        }

        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidFormat(format!(
                    "expected MAJOR.MINOR.PATCH, got '{}'",
                    version_str
                )));
            }
            *slot = part
                .parse()
                .map_err(|_| VersionError::Overflow(part.to_string()))?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }

    /// Check if this version satisfies a version range
    pub fn satisfies(&self, range: &VersionRange) -> bool {
        range.matches(self)
    }
}

impl fmt::Display for DocumentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for DocumentVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DocumentVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Version range used when looking documents up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRange {
    /// Exact version match
    Exact(DocumentVersion),
    /// Caret range (^X.Y.Z) - compatible with specified version
    Caret(DocumentVersion),
    /// Tilde range (~X.Y.Z) - patch level changes only
    Tilde(DocumentVersion),
    /// Greater than or equal
    GreaterOrEqual(DocumentVersion),
    /// Less than
    LessThan(DocumentVersion),
    /// Any version
    Any,
}

impl VersionRange {
    /// Parse a version range string
    pub fn parse(range_str: &str) -> Result<Self, VersionError> {
        let range_str = range_str.trim();

        if range_str == "*" || range_str.is_empty() {
            return Ok(VersionRange::Any);
        }

        let parse = |s: &str| {
            DocumentVersion::parse(s.trim())
                .map_err(|e| VersionError::InvalidRange(format!("{}: {}", range_str, e)))
        };

        if let Some(version_str) = range_str.strip_prefix('^') {
            return Ok(VersionRange::Caret(parse(version_str)?));
        }
        if let Some(version_str) = range_str.strip_prefix('~') {
            return Ok(VersionRange::Tilde(parse(version_str)?));
        }
        if let Some(version_str) = range_str.strip_prefix(">=") {
            return Ok(VersionRange::GreaterOrEqual(parse(version_str)?));
        }
        if let Some(version_str) = range_str.strip_prefix('<') {
            return Ok(VersionRange::LessThan(parse(version_str)?));
        }

        Ok(VersionRange::Exact(parse(range_str)?))
    }

    /// Check if a version matches this range
    pub fn matches(&self, version: &DocumentVersion) -> bool {
        match self {
            VersionRange::Any => true,
            VersionRange::Exact(v) => version == v,
            VersionRange::Caret(v) => {
                if v.major == 0 {
                    // 0.x releases treat a minor bump as breaking
                    version.major == 0 && version.minor == v.minor && version.patch >= v.patch
                } else {
                    version.major == v.major && version >= v
                }
            }
            VersionRange::Tilde(v) => {
                version.major == v.major && version.minor == v.minor && version.patch >= v.patch
            }
            VersionRange::GreaterOrEqual(v) => version >= v,
            VersionRange::LessThan(v) => version < v,
        }
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRange::Any => write!(f, "*"),
            VersionRange::Exact(v) => write!(f, "{}", v),
            VersionRange::Caret(v) => write!(f, "^{}", v),
            VersionRange::Tilde(v) => write!(f, "~{}", v),
            VersionRange::GreaterOrEqual(v) => write!(f, ">={}", v),
            VersionRange::LessThan(v) => write!(f, "<{}", v),
        }
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Version parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    #[error("Version component '{0}' does not fit in 64 bits")]
    Overflow(String),
    #[error("Invalid version range: {0}")]
    InvalidRange(String),
}
