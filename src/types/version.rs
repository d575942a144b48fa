use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::utils::error::VersionError;

/// The four fields stored in the version include file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionDescriptor {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub postfix: String,
}

impl VersionDescriptor {
    pub fn new(major: u32, minor: u32, patch: u32, postfix: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            postfix: postfix.into(),
        }
    }

    pub fn bump_major(&mut self) {
        self.major = self.major.saturating_add(1);
        self.minor = 0;
        self.patch = 0;
        self.postfix.clear();
    }

    pub fn bump_minor(&mut self) {
        self.minor = self.minor.saturating_add(1);
        self.patch = 0;
        self.postfix.clear();
    }

    pub fn bump_patch(&mut self) {
        self.patch = self.patch.saturating_add(1);
        self.postfix.clear();
    }

    /// Packs the release fields as `major * 1_000_000 + minor * 1_000 + patch`.
    pub fn as_int(&self) -> u64 {
        u64::from(self.major) * 1_000_000 + u64::from(self.minor) * 1_000 + u64::from(self.patch)
    }

    /// Compares release fields only, postfix is not part of the ordering.
    pub fn cmp_release(&self, other: &Self) -> Ordering {
        self.as_int().cmp(&other.as_int())
    }

    /// The `v`-prefixed form printed by the CLI.
    pub fn tag(&self) -> String {
        format!("v{}", self)
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.postfix.is_empty() {
            write!(f, "-{}", self.postfix)?;
        }
        Ok(())
    }
}

impl FromStr for VersionDescriptor {
    type Err = VersionError;

    /// Accepts `1.2.3`, `v1.2.3` and `1.2.3-rc1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let (base, postfix) = match bare.split_once('-') {
            Some((b, p)) => (b, p),
            None => (bare, ""),
        };

        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidVersion {
                input: s.to_string(),
                reason: "expected MAJOR.MINOR.PATCH".to_string(),
            });
        }

        let parse = |name: &str, value: &str| {
            value
                .parse::<u32>()
                .map_err(|_| VersionError::InvalidVersion {
                    input: s.to_string(),
                    reason: format!("invalid {} component '{}'", name, value),
                })
        };

        Ok(Self::new(
            parse("major", parts[0])?,
            parse("minor", parts[1])?,
            parse("patch", parts[2])?,
            postfix,
        ))
    }
}
