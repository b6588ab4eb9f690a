//! Extraction of the flat payload from page markup
//!
//! The source is a server-rendered SPA: the whole data model sits in a
//! `<script id="__NUXT_DATA__">` tag as one flat JSON reference array, so no
//! script execution is needed — just a selector lookup and a JSON parse.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::payload_decoder::FlatStore;
use crate::constants::PAYLOAD_TAG_ID;
use crate::{Error, Result};

/// Extract the embedded payload array from page markup and wrap it in a
/// flat store
///
/// Fails when the payload tag is missing (site structure changed), its text
/// is not valid JSON, or the parsed document is not a top-level array. All
/// three are batch-fatal: without the array there is nothing to decode.
pub fn extract_store(html: &str) -> Result<FlatStore> {
    let payload = extract_payload_text(html)?;

    let parsed: Value = serde_json::from_str(&payload)
        .map_err(|e| Error::payload_parse(format!("script tag '{PAYLOAD_TAG_ID}'"), e))?;

    let Value::Array(values) = parsed else {
        return Err(Error::payload_shape(format!(
            "expected a top-level JSON array in '{PAYLOAD_TAG_ID}', found {}",
            json_type_name(&parsed)
        )));
    };

    debug!("Payload array holds {} nodes", values.len());
    Ok(FlatStore::from_values(&values))
}

/// Locate the payload script tag and return its text content
fn extract_payload_text(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("script[id=\"{PAYLOAD_TAG_ID}\"]"))
        .expect("payload tag selector is valid CSS");

    let tag = document.select(&selector).next().ok_or_else(|| {
        Error::payload_missing(format!(
            "script tag '{PAYLOAD_TAG_ID}' not present — site structure may have changed"
        ))
    })?;

    let text: String = tag.text().collect();
    if text.trim().is_empty() {
        return Err(Error::payload_missing(format!(
            "script tag '{PAYLOAD_TAG_ID}' is empty"
        )));
    }

    Ok(text)
}

/// Human-readable JSON type name for shape errors
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
