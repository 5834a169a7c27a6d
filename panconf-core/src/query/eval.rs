use super::{AttrPredicate, NameTest, Query, Step};
use crate::tree::Element;

/// Evaluate a compiled query with `root` as the context node.
///
/// Every step only descends one level, so walking the current node set in
/// order keeps the result in document order.
pub fn evaluate<'a>(root: &'a Element, query: &Query) -> Vec<&'a Element> {
    let mut current = vec![root];
    for step in &query.steps {
        current = apply_step(&current, step);
        if current.is_empty() {
            break;
        }
    }
    current
}

fn apply_step<'a>(nodes: &[&'a Element], step: &Step) -> Vec<&'a Element> {
    let candidates: Vec<&'a Element> = match &step.name {
        NameTest::Context => nodes.to_vec(),
        NameTest::Any => nodes.iter().flat_map(|n| n.children.iter()).collect(),
        NameTest::Tag(tag) => nodes
            .iter()
            .flat_map(|n| n.children.iter())
            .filter(|child| &child.tag == tag)
            .collect(),
    };

    candidates
        .into_iter()
        .filter(|node| step.predicates.iter().all(|p| matches_predicate(node, p)))
        .collect()
}

fn matches_predicate(node: &Element, predicate: &AttrPredicate) -> bool {
    match (&predicate.value, node.attributes.get(&predicate.key)) {
        (None, found) => found.is_some(),
        (Some(expected), Some(actual)) => expected == actual,
        (Some(_), None) => false,
    }
}
