use crate::statics;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de};

/// Represents a number that keeps the distinction between I64, U64, and F64.
/// Ids are compared as integers, so the integer forms must not be folded into floats.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl ItemNumber {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ItemNumber::I64(v) => Some(*v),
            ItemNumber::U64(v) => i64::try_from(*v).ok(),
            ItemNumber::F64(_) => None,
        }
    }

    /// Integer value with float truncation, the way ids typed as `2.0` or `2.7` are read.
    fn truncated(&self) -> Option<i64> {
        match self {
            ItemNumber::F64(v) if v.is_finite() => {
                let t = v.trunc();
                // `as` saturates, so reject anything outside the i64 range explicitly.
                if t >= i64::MIN as f64 && t < i64::MAX as f64 {
                    Some(t as i64)
                } else {
                    None
                }
            }
            ItemNumber::F64(_) => None,
            _ => self.as_i64(),
        }
    }
}

impl<'de> Deserialize<'de> for ItemNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl<'de> de::Visitor<'de> for NumberVisitor {
            type Value = ItemNumber;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON5 number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ItemNumber::I64(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ItemNumber::U64(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ItemNumber::F64(v))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

/// A dynamic option/model value (JSON5 data model).
/// Records are `Object`s; their field order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValue {
    Null,
    Bool(bool),
    Number(ItemNumber),
    String(String),
    Array(Vec<ItemValue>),
    Object(IndexMap<String, ItemValue>),
}

impl ItemValue {
    pub fn as_object(&self) -> Option<&IndexMap<String, ItemValue>> {
        match self {
            ItemValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ItemValue::Null)
    }

    pub fn get(&self, key: &str) -> Option<&ItemValue> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ItemValue::Null => "null",
            ItemValue::Bool(_) => "bool",
            ItemValue::Number(_) => "number",
            ItemValue::String(_) => "string",
            ItemValue::Array(_) => "array",
            ItemValue::Object(_) => "object",
        }
    }

    pub fn parse_json5(text: &str) -> anyhow::Result<ItemValue> {
        Ok(json5::from_str::<ItemValue>(text)?)
    }

    pub fn to_json5_compact(&self) -> String {
        let mut out = String::new();
        self.write_json5(&mut out);
        out
    }

    /// Lenient integer reading of a value: integer numbers as-is, finite floats truncated,
    /// strings by their leading integer prefix. Everything else is not an integer.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            ItemValue::Number(n) => n.truncated(),
            ItemValue::String(s) => parse_int_prefix(s),
            _ => None,
        }
    }

    /// Integer value of `field`, `None` when the field is missing or not integer-like.
    pub fn int_field(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(ItemValue::parse_int)
    }

    /// Display label of `field`. Missing and null fields have no label.
    pub fn label_field(&self, field: &str) -> Option<String> {
        self.get(field).and_then(ItemValue::to_label)
    }

    pub fn to_label(&self) -> Option<String> {
        match self {
            ItemValue::Null => None,
            ItemValue::String(s) => Some(s.clone()),
            ItemValue::Bool(v) => Some(
                if *v {
                    statics::EN_LITERAL_TRUE
                } else {
                    statics::EN_LITERAL_FALSE
                }
                .to_string(),
            ),
            other => Some(other.to_json5_compact()),
        }
    }

    fn write_json5(&self, out: &mut String) {
        match self {
            ItemValue::Null => out.push_str("null"),
            ItemValue::Bool(v) => out.push_str(if *v {
                statics::EN_LITERAL_TRUE
            } else {
                statics::EN_LITERAL_FALSE
            }),
            ItemValue::Number(n) => n.write_json5(out),
            ItemValue::String(s) => write_escaped_string(out, s),
            ItemValue::Array(values) => {
                out.push('[');
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    v.write_json5(out);
                }
                out.push(']');
            }
            ItemValue::Object(map) => {
                out.push('{');
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_escaped_string(out, k);
                    out.push(':');
                    v.write_json5(out);
                }
                out.push('}');
            }
        }
    }
}

impl ItemNumber {
    fn write_json5(&self, out: &mut String) {
        match self {
            ItemNumber::I64(v) => out.push_str(&v.to_string()),
            ItemNumber::U64(v) => out.push_str(&v.to_string()),
            ItemNumber::F64(v) => {
                if v.is_nan() {
                    out.push_str("NaN");
                } else if v.is_infinite() {
                    if v.is_sign_negative() {
                        out.push_str("-Infinity");
                    } else {
                        out.push_str("Infinity");
                    }
                } else if v.fract() == 0.0 && v.abs() < 1e15 {
                    // Whole floats read like integers in labels ("2", not "2.0").
                    out.push_str(&(*v as i64).to_string());
                } else {
                    let mut buf = ryu::Buffer::new();
                    out.push_str(buf.format(*v));
                }
            }
        }
    }
}

/// Leading-integer parse: optional whitespace and sign, `0x` selects hex, then the longest
/// digit run. Trailing garbage is ignored ("12px" is 12).
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04X}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl<'de> Deserialize<'de> for ItemValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = ItemValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON5 value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ItemValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ItemValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ItemValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ItemValue::Number(ItemNumber::I64(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ItemValue::Number(ItemNumber::U64(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ItemValue::Number(ItemNumber::F64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ItemValue::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ItemValue::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<ItemValue>()? {
                    values.push(value);
                }
                Ok(ItemValue::Array(values))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, ItemValue>()? {
                    values.insert(key, value);
                }
                Ok(ItemValue::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
