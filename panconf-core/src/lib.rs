//! XML tree primitives for configuration documents: parsing, writing, path
//! queries, and the dict/flat/`set` serializers.

pub mod format;
pub mod parser;
pub mod query;
pub mod tree;
pub mod writer;

pub use format::{
    format_json, quote_arg, to_dict, to_flat, to_set_cli, DictValue, ForceList, JsonStyle,
};
pub use parser::{parse, parse_file, ParseError};
pub use query::{select, QueryError};
pub use tree::Element;
pub use writer::{write, write_file, write_nodes, WriteError};
