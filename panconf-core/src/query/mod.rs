//! Restricted path queries over an [`Element`] tree.
//!
//! The accepted language is a small subset of the ElementTree path syntax:
//! child steps separated by `/`, an optional leading `.`, the `*` wildcard,
//! and attribute predicates of the form `[@key]` or `[@key='value']` on any
//! step. Everything else (absolute paths, `//`, `..`, positional and function
//! predicates) is rejected with a [`QueryError`] instead of being guessed at.

pub mod eval;
pub mod syntax;

use thiserror::Error;
use tracing::debug;

use crate::tree::Element;

pub use eval::evaluate;
pub use syntax::parse_query;

/// A compiled query: one step per `/`-separated path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub steps: Vec<Step>,
}

/// One path segment with its predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: NameTest,
    pub predicates: Vec<AttrPredicate>,
}

/// What a step matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// `.`: the current node set itself.
    Context,
    /// `*`: every child element.
    Any,
    /// A child element with exactly this tag.
    Tag(String),
}

/// `[@key]` when `value` is `None`, `[@key='value']` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPredicate {
    pub key: String,
    pub value: Option<String>,
}

/// The query text did not follow the supported grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid query {query:?} at offset {offset}: {reason}")]
pub struct QueryError {
    pub query: String,
    pub offset: usize,
    pub reason: String,
}

/// Resolve `query` against `root`.
///
/// `None`, an empty string, or `.` select the root itself. A valid query that
/// matches nothing yields an empty vector.
pub fn select<'a>(root: &'a Element, query: Option<&str>) -> Result<Vec<&'a Element>, QueryError> {
    let Some(text) = query.filter(|q| !q.is_empty()) else {
        return Ok(vec![root]);
    };

    let compiled = parse_query(text)?;
    let nodes = evaluate(root, &compiled);
    debug!(query = text, matches = nodes.len(), "selected nodes");
    Ok(nodes)
}
