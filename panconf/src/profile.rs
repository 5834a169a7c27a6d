//! Release-aware default export paths.
//!
//! Which top-level subtrees are worth exporting depends on the software
//! release, the device role, and whether multiple virtual systems are in use.
//! The table is declarative TOML, embedded at build time and replaceable with
//! a file of the same shape.

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use panconf_core::query::parse_query;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::classify::ConfigClassification;

/// Device role a profile applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Firewall,
    Panorama,
}

/// Virtual-system arity a profile applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VsysArity {
    #[default]
    Single,
    Multi,
}

/// One record of the table: a full path list for a role/arity from `cutover`
/// onward.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReleaseProfile {
    #[serde(default)]
    pub cutover: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub vsys: VsysArity,
    pub paths: Vec<String>,
}

impl ReleaseProfile {
    fn cutover_version(&self) -> ReleaseVersion {
        self.cutover
            .as_deref()
            .and_then(ReleaseVersion::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    profile: Vec<ReleaseProfile>,
}

/// Errors returned when loading a profile table.
#[derive(Debug, Error)]
pub enum ProfileLoadError {
    #[error("failed to read profiles file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse profiles file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid profiles file {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// Dotted numeric release version, compared component by component.
///
/// Trailing non-digit suffixes on a component (`10.1.0-h3`) are ignored;
/// missing components count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion(Vec<u32>);

impl ReleaseVersion {
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = Vec::new();
        for component in raw.trim().split('.') {
            let digits: String = component.chars().take_while(char::is_ascii_digit).collect();
            parts.push(digits.parse::<u32>().ok()?);
        }
        while parts.len() < 3 {
            parts.push(0);
        }
        Some(Self(parts))
    }
}

impl Display for ReleaseVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Ordered set of release profiles plus where they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseProfileTable {
    profiles: Vec<ReleaseProfile>,
    source: String,
}

impl ReleaseProfileTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self, ProfileLoadError> {
        let raw = include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/profiles/release_profiles.toml"
        ));
        Self::from_toml(raw, "embedded")
    }

    /// Load a table from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ProfileLoadError> {
        let raw = fs::read_to_string(path).map_err(|source| ProfileLoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw, &format!("file:{}", path.display()))
    }

    /// Load `path` when given, otherwise the embedded table.
    pub fn load(path: Option<&Path>) -> Result<Self, ProfileLoadError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }

    /// Parse and validate TOML table text.
    pub fn from_toml(raw: &str, source: &str) -> Result<Self, ProfileLoadError> {
        let parsed: ProfileFile = toml::from_str(raw).map_err(|err| ProfileLoadError::Parse {
            path: source.to_string(),
            source: err,
        })?;

        let invalid = |reason: String| ProfileLoadError::Invalid {
            path: source.to_string(),
            reason,
        };

        if parsed.profile.is_empty() {
            return Err(invalid("no [[profile]] records".to_string()));
        }
        for profile in &parsed.profile {
            if let Some(cutover) = &profile.cutover {
                if ReleaseVersion::parse(cutover).is_none() {
                    return Err(invalid(format!("cutover {cutover:?} is not a version")));
                }
            }
            for path in &profile.paths {
                parse_query(path).map_err(|err| invalid(err.to_string()))?;
            }
        }

        debug!(source, records = parsed.profile.len(), "loaded release profiles");
        Ok(Self {
            profiles: parsed.profile,
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn profiles(&self) -> &[ReleaseProfile] {
        &self.profiles
    }

    /// Pick the record for a classified document.
    ///
    /// Multiple vsys wins over role; then Panorama; then a single-vsys
    /// firewall. Unknown flags count as `false`.
    pub fn resolve(&self, classification: &ConfigClassification) -> Option<&ReleaseProfile> {
        let (role, vsys) = if classification.has_multiple_vsys == Some(true) {
            (Role::Firewall, VsysArity::Multi)
        } else if classification.is_orchestrator == Some(true) {
            (Role::Panorama, VsysArity::Single)
        } else {
            (Role::Firewall, VsysArity::Single)
        };

        let candidates: Vec<&ReleaseProfile> = self
            .profiles
            .iter()
            .filter(|p| p.role == role && p.vsys == vsys)
            .collect();

        let chosen = closest_era(candidates, classification.version.as_deref());
        debug!(
            ?role,
            ?vsys,
            version = classification.version.as_deref().unwrap_or("unset"),
            cutover = chosen.and_then(|p| p.cutover.as_deref()).unwrap_or("none"),
            "resolved release profile"
        );
        chosen
    }

    /// Default export paths for a classified document.
    pub fn default_paths(&self, classification: &ConfigClassification) -> Option<&[String]> {
        self.resolve(classification).map(|p| p.paths.as_slice())
    }
}

fn closest_era<'a>(
    mut candidates: Vec<&'a ReleaseProfile>,
    version: Option<&str>,
) -> Option<&'a ReleaseProfile> {
    candidates.sort_by_key(|p| p.cutover_version());
    let oldest = candidates.first().copied();

    let Some(version) = version.and_then(ReleaseVersion::parse) else {
        warn!(
            version = version.unwrap_or("unset"),
            "unrecognized release version; using the oldest profile"
        );
        return oldest;
    };

    let era = candidates
        .iter()
        .rev()
        .find(|p| p.cutover_version() <= version)
        .copied()
        .or(oldest);
    debug!(%version, "resolved release era");
    era
}
