//! Lenient field decoders
//!
//! The editor is not strict about field types: alignment is sometimes `0`, captions can be
//! nested editor states, ids arrive as numbers. These helpers accept what we can use and map the
//! rest to the field's default instead of failing the whole node.

use super::format::Alignment;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn alignment<'de, D>(deserializer: D) -> Result<Alignment, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(keyword)) => Alignment::from_keyword(&keyword),
        _ => Alignment::Left,
    })
}

/// Strings pass through, numbers are stringified, everything else is `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Booleans pass through, anything else is `None`.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.as_bool()))
}
