use std::path::Path;
use std::sync::OnceLock;

use panconf_core::{
    parse, parse_file, select, to_dict, to_flat, to_set_cli, write_nodes, DictValue, Element,
    ForceList,
};
use tracing::debug;

use crate::classify::{
    detect_multi_vsys, detect_orchestrator, detect_version, ConfigClassification,
};
use crate::error::PanConfigError;
use crate::profile::ReleaseProfileTable;

/// A parsed configuration document.
///
/// The tree is read-only once loaded; each classification field is computed on
/// first use and cached for the life of the value, as is the assembled
/// [`ConfigClassification`]. `PanConfig` is `Sync`, and
/// concurrent first access computes each field at most once.
#[derive(Debug)]
pub struct PanConfig {
    root: Element,
    version: OnceLock<Option<String>>,
    orchestrator: OnceLock<Option<bool>>,
    multi_vsys: OnceLock<Option<bool>>,
    classification: OnceLock<ConfigClassification>,
}

impl PanConfig {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            version: OnceLock::new(),
            orchestrator: OnceLock::new(),
            multi_vsys: OnceLock::new(),
            classification: OnceLock::new(),
        }
    }

    pub fn from_bytes(xml: &[u8]) -> Result<Self, PanConfigError> {
        Ok(Self::new(parse(xml)?))
    }

    pub fn from_file(path: &Path) -> Result<Self, PanConfigError> {
        Ok(Self::new(parse_file(path)?))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn version(&self) -> Option<&str> {
        self.version
            .get_or_init(|| detect_version(&self.root).map(str::to_string))
            .as_deref()
    }

    pub fn is_orchestrator(&self) -> Option<bool> {
        *self
            .orchestrator
            .get_or_init(|| detect_orchestrator(&self.root))
    }

    pub fn has_multiple_vsys(&self) -> Option<bool> {
        *self.multi_vsys.get_or_init(|| detect_multi_vsys(&self.root))
    }

    pub fn classification(&self) -> &ConfigClassification {
        self.classification.get_or_init(|| ConfigClassification {
            version: self.version().map(str::to_string),
            is_orchestrator: self.is_orchestrator(),
            has_multiple_vsys: self.has_multiple_vsys(),
        })
    }

    /// Nodes matching `query`, or the root when no query is given.
    pub fn select(&self, query: Option<&str>) -> Result<Vec<&Element>, PanConfigError> {
        Ok(select(&self.root, query)?)
    }

    /// Nodes matching any of `queries`, grouped by query in the given order.
    ///
    /// Every query is compiled before any result is returned.
    pub fn select_all<S: AsRef<str>>(&self, queries: &[S]) -> Result<Vec<&Element>, PanConfigError> {
        let mut nodes = Vec::new();
        for query in queries {
            nodes.extend(self.select(Some(query.as_ref()))?);
        }
        Ok(nodes)
    }

    /// Release-profile export paths for this document.
    pub fn default_paths<'t>(
        &self,
        table: &'t ReleaseProfileTable,
    ) -> Result<&'t [String], PanConfigError> {
        let Some(version) = self.version() else {
            return Err(PanConfigError::UnrecognizedDocument {
                root_tag: self.root.tag.clone(),
            });
        };

        let paths = table
            .default_paths(self.classification())
            .ok_or_else(|| PanConfigError::NoProfile {
                source_name: table.source().to_string(),
                version: version.to_string(),
            })?;
        debug!(paths = paths.len(), "resolved default export paths");
        Ok(paths)
    }

    /// Selected nodes as concatenated XML.
    pub fn xml(&self, query: Option<&str>) -> Result<String, PanConfigError> {
        Ok(write_nodes(&self.select(query)?)?)
    }

    /// Selected nodes as a dict tree.
    pub fn dict(
        &self,
        query: Option<&str>,
        forcelist: &ForceList,
    ) -> Result<DictValue, PanConfigError> {
        Ok(to_dict(&self.select(query)?, forcelist))
    }

    /// Selected nodes as flat path lines starting with `base_path`.
    pub fn flat(&self, query: Option<&str>, base_path: &str) -> Result<Vec<String>, PanConfigError> {
        Ok(to_flat(&self.select(query)?, base_path))
    }

    /// Selected nodes as `set` command lines starting with `base_path`.
    pub fn set_cli(
        &self,
        query: Option<&str>,
        base_path: &str,
        collapse_members: bool,
    ) -> Result<Vec<String>, PanConfigError> {
        Ok(to_set_cli(&self.select(query)?, base_path, collapse_members))
    }
}
