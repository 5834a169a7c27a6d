use serde_json::{Map, Value};

use crate::format::dict::DictValue;

/// JSON layout for [`format_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Two-space indentation with object keys sorted.
    #[default]
    Pretty,
    /// No whitespace, keys in document order.
    Compact,
}

/// Serialize a [`DictValue`] as JSON text.
pub fn format_json(value: &DictValue, style: JsonStyle) -> Result<String, serde_json::Error> {
    match style {
        JsonStyle::Pretty => serde_json::to_string_pretty(&sorted(value)),
        JsonStyle::Compact => serde_json::to_string(value),
    }
}

fn sorted(value: &DictValue) -> Value {
    match value {
        DictValue::Null => Value::Null,
        DictValue::Bool(b) => Value::Bool(*b),
        DictValue::Text(s) => Value::String(s.clone()),
        DictValue::List(items) => Value::Array(items.iter().map(sorted).collect()),
        DictValue::Map(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key.as_str()]));
            }
            Value::Object(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{format_json, JsonStyle};
    use crate::format::dict::{to_dict, ForceList};
    use crate::parser::parse;

    fn sample() -> crate::format::dict::DictValue {
        let node = parse(br#"<zone><entry name="z"><network><layer3/></network><enable-user-identification>yes</enable-user-identification></entry></zone>"#)
            .expect("parse");
        to_dict(&[&node], &ForceList::default())
    }

    #[test]
    fn compact_keeps_document_order() {
        let out = format_json(&sample(), JsonStyle::Compact).expect("json");
        assert_eq!(
            out,
            r#"{"zone":{"entry":[{"name":"z","network":{"layer3":null},"enable-user-identification":true}]}}"#
        );
    }

    #[test]
    fn pretty_sorts_keys_and_indents() {
        let out = format_json(&sample(), JsonStyle::Pretty).expect("json");
        let expected = r#"{
  "zone": {
    "entry": [
      {
        "enable-user-identification": true,
        "name": "z",
        "network": {
          "layer3": null
        }
      }
    ]
  }
}"#;
        assert_eq!(out, expected);
    }
}
