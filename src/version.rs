//! Version string handling for browser, script, and DOM versions.
//!
//! Two parsers with different tolerance: [`ClrVersion`] accepts only
//! `major.minor[.build[.revision]]` with non-negative integer components,
//! while [`PermissiveVersion`] pulls the first two digit runs out of any text.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Strictly parsed two- to four-component version.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct ClrVersion {
    pub major: u32,
    pub minor: u32,
    pub build: Option<u32>,
    pub revision: Option<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VersionParseError(String);

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid version '{}'", self.0)
    }
}

impl std::error::Error for VersionParseError {}

impl ClrVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: None,
            revision: None,
        }
    }

    /// Render only the first `fields` components (clamped to 1..=4).
    pub fn to_string_fields(&self, fields: usize) -> String {
        let mut parts = vec![self.major.to_string()];
        let rest = [Some(self.minor), self.build, self.revision];
        for part in rest.into_iter().take(fields.clamp(1, 4) - 1) {
            parts.push(part.unwrap_or(0).to_string());
        }
        parts.join(".")
    }
}

impl FromStr for ClrVersion {
    type Err = VersionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionParseError(raw.to_string());
        let parts: Vec<&str> = raw.split('.').collect();
        if !(2..=4).contains(&parts.len()) {
            return Err(invalid());
        }
        let mut numbers = Vec::with_capacity(parts.len());
        for part in parts {
            let part = part.trim();
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            // Components are bounded by i32::MAX for compatibility with the
            // data files, which store them signed.
            let value: i32 = part.parse().map_err(|_| invalid())?;
            numbers.push(value as u32);
        }
        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            build: numbers.get(2).copied(),
            revision: numbers.get(3).copied(),
        })
    }
}

impl fmt::Display for ClrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
            if let Some(revision) = self.revision {
                write!(f, ".{revision}")?;
            }
        }
        Ok(())
    }
}

/// Major/minor pair extracted from arbitrary text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermissiveVersion {
    pub major: String,
    pub minor: String,
}

impl PermissiveVersion {
    /// First digit run is the major, second is the minor; `"0"` fills gaps.
    pub fn extract(raw: &str) -> Self {
        let mut runs = DIGIT_RUNS.find_iter(raw).map(|m| m.as_str().to_string());
        let major = runs.next().unwrap_or_else(|| "0".to_string());
        let minor = runs.next().unwrap_or_else(|| "0".to_string());
        Self { major, minor }
    }

    pub fn version(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}
