use anyhow::Result;
use serde_json::Value as JsonValue;
use std::io::{self, Write};

/// Writes `data` to stdout as YAML.
pub fn emit_data(data: &JsonValue) -> Result<()> {
    let s = serde_yaml::to_string(data)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", s.trim_end())?;
    out.flush()?;
    Ok(())
}

pub fn error_document(err: &anyhow::Error) -> JsonValue {
    let mut map = serde_json::Map::new();
    map.insert("error".into(), JsonValue::String(err.to_string()));
    let causes: Vec<JsonValue> = err.chain().skip(1).map(|c| JsonValue::String(c.to_string())).collect();
    if !causes.is_empty() {
        map.insert("caused_by".into(), JsonValue::Array(causes));
    }
    JsonValue::Object(map)
}

pub fn emit_error(err: &anyhow::Error) -> Result<()> {
    let s = serde_yaml::to_string(&error_document(err))?;
    let _ = writeln!(io::stderr(), "{}", s.trim_end());
    Ok(())
}
