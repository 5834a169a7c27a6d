//! Serializers that render a selected subtree as dict/JSON, flat paths, or
//! `set` commands.

pub mod dict;
pub mod flat;
pub mod json;
pub mod set_cli;

pub use dict::{to_dict, DictValue, ForceList};
pub use flat::to_flat;
pub use json::{format_json, JsonStyle};
pub use set_cli::{quote_arg, to_set_cli};
