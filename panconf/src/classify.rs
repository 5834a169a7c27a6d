use panconf_core::{select, Element};
use serde::Serialize;
use tracing::debug;

/// Root tag of a device or Panorama configuration document.
pub const CONFIG_ROOT_TAG: &str = "config";

/// Subtrees that only exist on a Panorama (orchestrator) configuration.
pub const ORCHESTRATOR_QUERIES: [&str; 2] = [
    "./panorama",
    "./devices/entry[@name='localhost.localdomain']/device-group",
];

/// Virtual-system entries of the local device.
pub const VSYS_ENTRY_QUERY: &str = "./devices/entry[@name='localhost.localdomain']/vsys/entry";

/// What a configuration document is, as far as export defaults care.
///
/// Every field is `None` when the root element is not `<config>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigClassification {
    /// Schema version from the root `version` attribute.
    pub version: Option<String>,
    /// `Some(true)` for Panorama, `Some(false)` for a standalone firewall.
    pub is_orchestrator: Option<bool>,
    /// `Some(true)` when more than one vsys entry exists.
    pub has_multiple_vsys: Option<bool>,
}

impl ConfigClassification {
    /// A document without a version cannot be matched to a release profile.
    pub fn is_recognized(&self) -> bool {
        self.version.is_some()
    }
}

/// Classify a document in one pass.
pub fn classify(root: &Element) -> ConfigClassification {
    ConfigClassification {
        version: detect_version(root).map(str::to_string),
        is_orchestrator: detect_orchestrator(root),
        has_multiple_vsys: detect_multi_vsys(root),
    }
}

/// Return the root `version` attribute of a `<config>` document.
pub fn detect_version(root: &Element) -> Option<&str> {
    if root.tag != CONFIG_ROOT_TAG {
        debug!(root = %root.tag, "root is not a config document; version unknown");
        return None;
    }
    root.attributes.get("version").map(String::as_str)
}

/// Detect a Panorama configuration from its orchestrator-only subtrees.
pub fn detect_orchestrator(root: &Element) -> Option<bool> {
    if root.tag != CONFIG_ROOT_TAG {
        return None;
    }
    let found = ORCHESTRATOR_QUERIES
        .iter()
        .any(|query| match_count(root, query) > 0);
    debug!(orchestrator = found, "classified device role");
    Some(found)
}

/// Detect whether more than one virtual system is configured.
pub fn detect_multi_vsys(root: &Element) -> Option<bool> {
    if root.tag != CONFIG_ROOT_TAG {
        return None;
    }
    let count = match_count(root, VSYS_ENTRY_QUERY);
    debug!(vsys = count, "counted vsys entries");
    Some(count > 1)
}

fn match_count(root: &Element, query: &str) -> usize {
    select(root, Some(query)).map_or(0, |nodes| nodes.len())
}
