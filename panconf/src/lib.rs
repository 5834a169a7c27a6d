//! PAN-OS and Panorama configuration export.
//!
//! A loaded configuration document can be rendered four ways: XML, a nested
//! dict (emitted as JSON), flat `path[=value]` lines, or `set` commands. The
//! heavy lifting lives in `panconf-core`; this crate adds what is specific to
//! the vendor's documents:
//!
//! - [`classify`] — schema version, Panorama vs. firewall, single vs. multi vsys
//! - [`profile`] — release-aware default export paths
//! - [`document`] — [`PanConfig`], a parsed document with cached classification
//! - [`output`] — text rendering used by the `panconf` binary
//!
//! # Examples
//!
//! ```
//! use panconf::PanConfig;
//!
//! let config = PanConfig::from_bytes(
//!     br#"<config version="10.1.0"><shared><address><entry name="a"><ip-netmask>1.2.3.0/24</ip-netmask></entry></address></shared></config>"#,
//! )?;
//! assert_eq!(config.version(), Some("10.1.0"));
//!
//! let lines = config.set_cli(Some("./shared/address"), "set ", false)?;
//! assert_eq!(lines, vec!["set address a ip-netmask 1.2.3.0/24"]);
//! # Ok::<(), panconf::PanConfigError>(())
//! ```

pub mod classify;
pub mod document;
pub mod error;
pub mod output;
pub mod profile;

pub use classify::{classify, ConfigClassification};
pub use document::PanConfig;
pub use error::PanConfigError;
pub use output::{render, render_classification, OutputKind, RenderOptions};
pub use profile::{ReleaseProfile, ReleaseProfileTable};
