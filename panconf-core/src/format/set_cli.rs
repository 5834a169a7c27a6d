use crate::tree::Element;

/// Render the selected nodes as `set`-style command lines.
///
/// Each line starts with `base_path` followed by the node's tag. `name`
/// attributes are hoisted into the command, `entry` and `member` children add
/// no keyword of their own, and leaves end with their quoted text. With
/// `collapse_members`, an element holding more than one `member` child becomes
/// a single `[ m1 m2 ... ]` line.
pub fn to_set_cli(nodes: &[&Element], base_path: &str, collapse_members: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for node in nodes {
        emit(
            node,
            format!("{base_path}{}", node.tag),
            collapse_members,
            &mut lines,
        );
    }
    lines
}

/// Wrap `value` in double quotes when it contains a space. Nothing is escaped.
pub fn quote_arg(value: &str) -> String {
    if value.contains(' ') {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn emit(elem: &Element, mut path: String, collapse_members: bool, out: &mut Vec<String>) {
    if let Some(name) = elem.attributes.get("name") {
        path.push(' ');
        path.push_str(&quote_arg(name));
    }

    if collapse_members {
        let members = elem.get_children("member");
        if members.len() > 1 {
            let values: Vec<String> = members
                .iter()
                .map(|m| quote_arg(m.trimmed_text().unwrap_or_default()))
                .collect();
            out.push(format!("{path} [ {} ]", values.join(" ")));
            return;
        }
    }

    if elem.is_leaf() {
        if let Some(text) = elem.trimmed_text() {
            path.push(' ');
            path.push_str(&quote_arg(text));
        }
        out.push(path);
        return;
    }

    for child in &elem.children {
        let child_path = match child.tag.as_str() {
            "entry" | "member" => path.clone(),
            tag => format!("{path} {tag}"),
        };
        emit(child, child_path, collapse_members, out);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{quote_arg, to_set_cli};
    use crate::parser::parse;

    #[test]
    fn address_entry_becomes_one_command() {
        let address = parse(
            br#"<address><entry name="a"><ip-netmask>1.2.3.0/24</ip-netmask></entry></address>"#,
        )
        .expect("parse");
        assert_eq!(
            to_set_cli(&[&address], "set ", false),
            vec!["set address a ip-netmask 1.2.3.0/24"]
        );
    }

    #[test]
    fn names_and_values_with_spaces_are_quoted() {
        let tag = parse(
            br#"<tag><entry name="web servers"><comments>front end</comments></entry></tag>"#,
        )
        .expect("parse");
        assert_eq!(
            to_set_cli(&[&tag], "set ", false),
            vec![r#"set tag "web servers" comments "front end""#]
        );
    }

    #[test]
    fn member_lists_expand_or_collapse() {
        let group = parse(
            br#"<address-group><entry name="g"><static><member>a</member><member>b c</member></static></entry></address-group>"#,
        )
        .expect("parse");

        assert_eq!(
            to_set_cli(&[&group], "set ", false),
            vec![
                "set address-group g static a",
                r#"set address-group g static "b c""#,
            ]
        );
        assert_eq!(
            to_set_cli(&[&group], "set ", true),
            vec![r#"set address-group g static [ a "b c" ]"#]
        );
    }

    #[test]
    fn single_member_is_not_collapsed() {
        let group = parse(br#"<static><member>a</member></static>"#).expect("parse");
        assert_eq!(
            to_set_cli(&[&group], "set ", true),
            to_set_cli(&[&group], "set ", false)
        );
        assert_eq!(to_set_cli(&[&group], "set ", true), vec!["set static a"]);
    }

    #[test]
    fn name_attribute_is_hoisted_regardless_of_position() {
        let zone = parse(br#"<zone><entry uuid="1" name="trust"><network/></entry></zone>"#)
            .expect("parse");
        assert_eq!(
            to_set_cli(&[&zone], "", false),
            vec!["zone trust network"]
        );
    }

    #[test]
    fn empty_member_in_collapsed_list_is_empty() {
        let group = parse(br#"<static><member>a</member><member/></static>"#).expect("parse");
        assert_eq!(to_set_cli(&[&group], "set ", true), vec!["set static [ a  ]"]);
    }

    #[test]
    fn surrounding_whitespace_is_not_part_of_the_value() {
        let system = parse(
            b"<system><hostname>fw01\n</hostname><static><member> a\n</member><member>b</member></static></system>",
        )
        .expect("parse");
        assert_eq!(
            to_set_cli(&[&system], "set ", false),
            vec!["set system hostname fw01", "set system static a", "set system static b"]
        );
        assert_eq!(
            to_set_cli(&[&system], "set ", true),
            vec!["set system hostname fw01", "set system static [ a b ]"]
        );
    }

    #[test]
    fn quote_arg_only_reacts_to_spaces() {
        assert_eq!(quote_arg("a\"b"), "a\"b");
        assert_eq!(quote_arg("tab\there"), "tab\there");
        assert_eq!(quote_arg("two words"), "\"two words\"");
    }
}
