//! `FIELD=VALUE` assignment parsing.

use anyhow::Context;
use entity_core::FieldValue;

/// Parse a `FIELD=VALUE` assignment into a field name and value.
///
/// The value is read as YAML, so `5` is an integer, `true` a boolean and
/// `[a, b]` a list. An empty or whitespace-only value stays a string, which
/// lets tests send blank names on purpose.
pub fn parse_assignment(s: &str) -> anyhow::Result<(String, FieldValue)> {
    let (name, raw) = s
        .split_once('=')
        .with_context(|| format!("Invalid assignment '{s}': expected FIELD=VALUE"))?;

    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Invalid assignment '{s}': empty field name");
    }

    if raw.trim().is_empty() {
        return Ok((name.to_string(), FieldValue::String(raw.to_string())));
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(raw)
        .with_context(|| format!("Invalid value for field '{name}': {raw}"))?;
    Ok((name.to_string(), FieldValue::from_yaml(&yaml)))
}
