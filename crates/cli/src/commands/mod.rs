//! Command implementations.

pub mod cart;
pub mod wishlist;

/// Parse a `key=value` display attribute.
///
/// The value is read as JSON when it parses (`rating=4.5`, `is_new=true`)
/// and kept as a string otherwise (`category=Fashion`).
pub fn parse_attribute(raw: &str) -> Result<(String, serde_json::Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("attribute name missing in {raw:?}"));
    }
    if matches!(key, "id" | "name" | "price" | "qty") {
        return Err(format!("{key:?} is not a free-form attribute"));
    }

    let value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
