use crate::tree::Element;

/// Render the selected nodes as one `path[=value]` line per text value,
/// attribute, and element, depth first in document order.
///
/// Attribute selectors accumulate onto the path, so every line below an
/// `entry` carries that entry's `[@name='...']` selector.
pub fn to_flat(nodes: &[&Element], base_path: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for node in nodes {
        flatten(node, format!("{base_path}{}", node.tag), &mut lines);
    }
    lines
}

fn flatten(elem: &Element, mut path: String, out: &mut Vec<String>) {
    match elem.trimmed_text() {
        None => out.push(path.clone()),
        Some(text) => {
            let text_lines: Vec<&str> = text.lines().collect();
            if text_lines.len() > 1 {
                for (n, line) in text_lines.iter().enumerate() {
                    out.push(format!("{path}[{}]=\"{line}\"", n + 1));
                }
            } else {
                out.push(format!("{path}=\"{text}\""));
            }
        }
    }

    for (key, value) in &elem.attributes {
        path.push_str(&format!("[@{key}='{value}']"));
        out.push(path.clone());
    }

    for child in &elem.children {
        flatten(child, format!("{path}/{}", child.tag), out);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::to_flat;
    use crate::parser::parse;
    use crate::tree::Element;

    #[test]
    fn address_entry_flattens_with_inherited_selector() {
        let address = parse(
            br#"<address><entry name="a"><ip-netmask>1.2.3.0/24</ip-netmask></entry></address>"#,
        )
        .expect("parse");

        assert_eq!(
            to_flat(&[&address], "./"),
            vec![
                "./address",
                "./address/entry",
                "./address/entry[@name='a']",
                "./address/entry[@name='a']/ip-netmask=\"1.2.3.0/24\"",
            ]
        );
    }

    #[test]
    fn multiline_text_is_numbered_per_line() {
        let node = Element::new("certificate").with_text("-----BEGIN-----\nAAAA\n-----END-----");
        assert_eq!(
            to_flat(&[&node], ""),
            vec![
                "certificate[1]=\"-----BEGIN-----\"",
                "certificate[2]=\"AAAA\"",
                "certificate[3]=\"-----END-----\"",
            ]
        );
    }

    #[test]
    fn attributes_follow_text_and_accumulate() {
        let node = Element::new("hostname")
            .with_attr("a", "1")
            .with_attr("b", "two words")
            .with_text(" fw01 ");
        assert_eq!(
            to_flat(&[&node], "/"),
            vec![
                "/hostname=\"fw01\"",
                "/hostname[@a='1']",
                "/hostname[@a='1'][@b='two words']",
            ]
        );
    }

    #[test]
    fn surrounding_newlines_stay_out_of_lines() {
        let node = parse(
            b"<r><hostname>fw01\n</hostname><banner>\nline one\nline two\n</banner></r>",
        )
        .expect("parse");
        assert_eq!(
            to_flat(&[&node], "./"),
            vec![
                "./r",
                "./r/hostname=\"fw01\"",
                "./r/banner[1]=\"line one\"",
                "./r/banner[2]=\"line two\"",
            ]
        );
    }

    #[test]
    fn line_count_depends_only_on_shape() {
        let node = Element::new("root")
            .with_child(Element::new("a").with_attr("k", "v"))
            .with_child(Element::new("b").with_text("x\ny"))
            .with_child(Element::new("c").with_text("   "));
        // root, a, a[@k], b[1], b[2], c
        assert_eq!(to_flat(&[&node], "").len(), 6);
    }

    #[test]
    fn each_selected_node_starts_from_the_base_path() {
        let a = Element::new("member").with_text("x");
        let b = Element::new("member").with_text("y");
        assert_eq!(
            to_flat(&[&a, &b], "./"),
            vec!["./member=\"x\"", "./member=\"y\""]
        );
    }
}
