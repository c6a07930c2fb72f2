//! Diagnostic rendering for runtime values.
//!
//! Failure messages are asserted on exactly, so rendering must be
//! deterministic and stable: map entries sort by rendered key, byte sequences
//! render as hex pairs, strings render quoted. The engines never format
//! inline; everything goes through this `Display` impl.

use std::fmt;

use crate::value::{Kind, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Nil => f.write_str("<nil>"),
            Kind::Bool(b) => write!(f, "{b}"),
            Kind::Int(i) => write!(f, "{i}"),
            Kind::Uint(u) => write!(f, "{u}"),
            Kind::Byte(b) => write!(f, "{b}"),
            Kind::Float(x) => write!(f, "{x}"),
            Kind::Char(c) => write!(f, "'{c}'"),
            Kind::Str(s) => write!(f, "{s:?}"),
            Kind::Seq(items) => {
                if !items.is_empty() && items.iter().all(|i| matches!(i.kind(), Kind::Byte(_))) {
                    write_bytes(f, items)
                } else {
                    write_list(f, items, "[", "]")
                }
            }
            Kind::Tuple(items) => write_list(f, items, "(", ")"),
            Kind::Map(entries) => {
                let mut rendered: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect();
                // Hash maps iterate in arbitrary order; sort for stable output.
                rendered.sort();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Kind::Record { fields } => {
                let name = short_name(self.type_name());
                if fields.is_empty() {
                    return f.write_str(&name);
                }
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|(field, v)| format!("{field}: {v}"))
                    .collect();
                write!(f, "{name} {{ {} }}", rendered.join(", "))
            }
            Kind::Time(t) => f.write_str(&t.to_rfc3339()),
            Kind::Custom(c) => f.write_str(c.repr()),
        }
    }
}

fn write_bytes(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        match item.kind() {
            Kind::Byte(b) => write!(f, "0x{b:02x}")?,
            _ => write!(f, "{item}")?,
        }
    }
    f.write_str("]")
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value], open: &str, close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

/// Last path segment of a type name, keeping any generic suffix.
///
/// `attest::tests::IntType` renders as `IntType`; generic arguments are left
/// as produced by `std::any::type_name`.
pub(crate) fn short_name(full: &str) -> String {
    match full.find('<') {
        Some(i) => format!("{}{}", last_segment(&full[..i]), &full[i..]),
        None => last_segment(full).to_string(),
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ToValue;
    use chrono::{FixedOffset, TimeZone};
    use std::collections::HashMap;

    fn render(v: impl ToValue) -> String {
        v.to_value().to_string()
    }

    #[test]
    fn scalars() {
        assert_eq!(render(42i32), "42");
        assert_eq!(render(true), "true");
        assert_eq!(render(1.5f64), "1.5");
        assert_eq!(render('a'), "'a'");
    }

    #[test]
    fn strings_render_quoted() {
        assert_eq!(render("hello"), "\"hello\"");
        assert_eq!(render("with \"quotes\""), "\"with \\\"quotes\\\"\"");
    }

    #[test]
    fn nil_renders_as_angle_nil() {
        assert_eq!(render(None::<i32>), "<nil>");
        assert_eq!(render(()), "<nil>");
    }

    #[test]
    fn sequences_render_bracketed() {
        assert_eq!(render(vec![42, 84]), "[42, 84]");
        assert_eq!(render(Vec::<i32>::new()), "[]");
        assert_eq!(render(vec!["a", "b"]), "[\"a\", \"b\"]");
    }

    #[test]
    fn byte_sequences_render_as_hex_pairs() {
        assert_eq!(render(b"abc".to_vec()), "[0x61, 0x62, 0x63]");
    }

    #[test]
    fn tuples_render_parenthesized() {
        assert_eq!(render((1i32, "x")), "(1, \"x\")");
    }

    #[test]
    fn maps_render_sorted_by_key() {
        let mut m = HashMap::new();
        m.insert("b", 2);
        m.insert("a", 1);
        assert_eq!(render(m), "{\"a\": 1, \"b\": 2}");
    }

    #[test]
    fn records_render_with_short_name() {
        struct IntType {
            val: i32,
        }
        impl ToValue for IntType {
            fn to_value(&self) -> crate::Value {
                crate::Value::record::<Self>([("val", self.val.to_value())])
            }
        }
        assert_eq!(render(IntType { val: 42 }), "IntType { val: 42 }");
    }

    #[test]
    fn times_render_rfc3339() {
        let t = FixedOffset::east_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 5, 0, 0)
            .unwrap();
        assert_eq!(render(t), "2025-01-01T05:00:00+05:00");
    }

    #[test]
    fn short_name_trims_path_segments() {
        assert_eq!(short_name("attest::format::tests::IntType"), "IntType");
        assert_eq!(short_name("i32"), "i32");
        assert_eq!(
            short_name("std::collections::HashMap<alloc::string::String, i32>"),
            "HashMap<alloc::string::String, i32>"
        );
    }
}
