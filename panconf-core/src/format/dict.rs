use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::Serialize;

use crate::tree::Element;

/// Nested map/list/scalar rendering of an element tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DictValue {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<DictValue>),
    Map(IndexMap<String, DictValue>),
}

impl DictValue {
    /// Look up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&DictValue> {
        match self {
            DictValue::Map(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DictValue]> {
        match self {
            DictValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DictValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Tags that always render as lists in [`to_dict`], however many siblings
/// share them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceList {
    tags: BTreeSet<String>,
}

impl ForceList {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl Default for ForceList {
    /// `entry` and `member`, the configuration schema's repeatable containers.
    fn default() -> Self {
        Self::new(["entry", "member"])
    }
}

/// Convert the selected nodes into one map keyed by tag.
///
/// A single node is stored directly under its tag. When several nodes are
/// selected, each one goes through the same list rule that applies to
/// siblings: a tag in `forcelist` or shared by more than one node becomes a
/// list.
pub fn to_dict(nodes: &[&Element], forcelist: &ForceList) -> DictValue {
    let mut obj = IndexMap::new();

    if let [node] = nodes {
        insert_element(&mut obj, node, false, forcelist);
        return DictValue::Map(obj);
    }

    let counts = tag_counts(nodes.iter().copied());
    for node in nodes {
        let force = forces_list(&node.tag, &counts, forcelist);
        insert_element(&mut obj, node, force, forcelist);
    }
    DictValue::Map(obj)
}

fn insert_element(
    obj: &mut IndexMap<String, DictValue>,
    elem: &Element,
    force: bool,
    forcelist: &ForceList,
) {
    let value = element_value(elem, forcelist);

    if !force {
        obj.insert(elem.tag.clone(), value);
        return;
    }

    let slot = obj
        .entry(elem.tag.clone())
        .or_insert_with(|| DictValue::List(Vec::new()));
    match slot {
        DictValue::List(items) => items.push(value),
        // An attribute or the text key already took this name.
        other => {
            let previous = std::mem::replace(other, DictValue::Null);
            *other = DictValue::List(vec![previous, value]);
        }
    }
}

fn element_value(elem: &Element, forcelist: &ForceList) -> DictValue {
    let text = elem.trimmed_text();

    if elem.is_leaf() && elem.attributes.is_empty() {
        return match text {
            None => DictValue::Null,
            Some("yes") => DictValue::Bool(true),
            Some("no") => DictValue::Bool(false),
            Some(other) => DictValue::Text(other.to_string()),
        };
    }

    let mut map: IndexMap<String, DictValue> = elem
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), DictValue::Text(v.clone())))
        .collect();

    // Text of a non-leaf element is stored under the element's own tag.
    if let Some(text) = text {
        map.insert(elem.tag.clone(), DictValue::Text(text.to_string()));
    }

    let counts = tag_counts(elem.children.iter());
    for child in &elem.children {
        let force = forces_list(&child.tag, &counts, forcelist);
        insert_element(&mut map, child, force, forcelist);
    }

    DictValue::Map(map)
}

fn tag_counts<'a>(nodes: impl Iterator<Item = &'a Element>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for node in nodes {
        *counts.entry(node.tag.as_str()).or_insert(0) += 1;
    }
    counts
}

fn forces_list(tag: &str, counts: &HashMap<&str, usize>, forcelist: &ForceList) -> bool {
    forcelist.contains(tag) || counts.get(tag).copied().unwrap_or(0) > 1
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    use super::{to_dict, DictValue, ForceList};
    use crate::tree::Element;

    fn text(s: &str) -> DictValue {
        DictValue::Text(s.to_string())
    }

    fn map(pairs: Vec<(&str, DictValue)>) -> DictValue {
        DictValue::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
        )
    }

    #[test]
    fn forcelist_tag_is_a_list_even_when_alone() {
        let address = Element::new("address").with_child(
            Element::new("entry")
                .with_attr("name", "a")
                .with_child(Element::new("ip-netmask").with_text("1.2.3.0/24")),
        );

        let out = to_dict(&[&address], &ForceList::default());
        assert_eq!(
            out,
            map(vec![(
                "address",
                map(vec![(
                    "entry",
                    DictValue::List(vec![map(vec![
                        ("name", text("a")),
                        ("ip-netmask", text("1.2.3.0/24")),
                    ])])
                )])
            )])
        );
    }

    #[test]
    fn repeated_sibling_tags_become_lists_including_the_first() {
        let parent = Element::new("servers")
            .with_child(Element::new("server").with_text("10.0.0.1"))
            .with_child(Element::new("server").with_text("10.0.0.2"))
            .with_child(Element::new("timeout").with_text("5"));

        let out = to_dict(&[&parent], &ForceList::default());
        let servers = out.get("servers").expect("servers");
        assert_eq!(
            servers.get("server").and_then(DictValue::as_list),
            Some(&[text("10.0.0.1"), text("10.0.0.2")][..])
        );
        assert_eq!(servers.get("timeout"), Some(&text("5")));
    }

    #[test]
    fn two_named_entries_make_a_two_item_list() {
        let parent = Element::new("tag")
            .with_child(Element::new("entry").with_attr("name", "x"))
            .with_child(Element::new("entry").with_attr("name", "y"));

        let out = to_dict(&[&parent], &ForceList::new(Vec::<String>::new()));
        let entries = out
            .get("tag")
            .and_then(|t| t.get("entry"))
            .and_then(DictValue::as_list)
            .expect("entry list");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].get("name"), Some(&text("y")));
    }

    #[test]
    fn empty_leaf_is_null_and_yes_no_become_booleans() {
        let parent = Element::new("settings")
            .with_child(Element::new("disabled").with_text("yes"))
            .with_child(Element::new("log-end").with_text("no"))
            .with_child(Element::new("YES").with_text("Yes"))
            .with_child(Element::new("description").with_text("   "))
            .with_child(Element::new("empty"));

        let out = to_dict(&[&parent], &ForceList::default());
        let settings = out.get("settings").expect("settings");
        assert_eq!(settings.get("disabled"), Some(&DictValue::Bool(true)));
        assert_eq!(settings.get("log-end"), Some(&DictValue::Bool(false)));
        assert_eq!(settings.get("YES"), Some(&text("Yes")));
        assert_eq!(settings.get("description"), Some(&DictValue::Null));
        assert_eq!(settings.get("empty"), Some(&DictValue::Null));
    }

    #[test]
    fn leaf_text_is_compared_without_surrounding_whitespace() {
        let parent = Element::new("r")
            .with_child(Element::new("disabled").with_text("yes\n"))
            .with_child(Element::new("hostname").with_text(" fw01\n"));

        let out = to_dict(&[&parent], &ForceList::default());
        let r = out.get("r").expect("r");
        assert_eq!(r.get("disabled"), Some(&DictValue::Bool(true)));
        assert_eq!(r.get("hostname"), Some(&text("fw01")));
    }

    #[test]
    fn text_of_attributed_element_is_keyed_by_its_own_tag() {
        let node = Element::new("hostname")
            .with_attr("origin", "dhcp")
            .with_text("fw01");

        let out = to_dict(&[&node], &ForceList::default());
        assert_eq!(
            out,
            map(vec![(
                "hostname",
                map(vec![("origin", text("dhcp")), ("hostname", text("fw01"))])
            )])
        );
    }

    #[test]
    fn single_selected_entry_is_not_forced_into_a_list() {
        let entry = Element::new("entry").with_attr("name", "a");
        let out = to_dict(&[&entry], &ForceList::default());
        assert_eq!(out, map(vec![("entry", map(vec![("name", text("a"))]))]));
    }

    #[test]
    fn multiple_selected_nodes_follow_the_sibling_rule() {
        let a = Element::new("entry").with_attr("name", "a");
        let b = Element::new("entry").with_attr("name", "b");
        let other = Element::new("shared");

        let out = to_dict(&[&a, &b, &other], &ForceList::new(["member"]));
        assert_eq!(out.get("entry").and_then(DictValue::as_list).map(<[_]>::len), Some(2));
        assert_eq!(out.get("shared"), Some(&DictValue::Null));
    }

    #[test]
    fn substitute_forcelist_changes_list_detection() {
        let parent = Element::new("rules").with_child(Element::new("rule").with_text("r1"));

        let default = to_dict(&[&parent], &ForceList::default());
        assert_eq!(
            default.get("rules").and_then(|r| r.get("rule")),
            Some(&text("r1"))
        );

        let custom = to_dict(&[&parent], &ForceList::new(["rule"]));
        assert_eq!(
            custom.get("rules").and_then(|r| r.get("rule")),
            Some(&DictValue::List(vec![text("r1")]))
        );
    }

    #[test]
    fn forced_child_colliding_with_attribute_keeps_both_values() {
        let node = Element::new("group")
            .with_attr("member", "inline")
            .with_child(Element::new("member").with_text("m1"));

        let out = to_dict(&[&node], &ForceList::default());
        assert_eq!(
            out.get("group").and_then(|g| g.get("member")),
            Some(&DictValue::List(vec![text("inline"), text("m1")]))
        );
    }
}
