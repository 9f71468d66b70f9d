use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{common::entities::app_errors::CoreError, menu::entities::MenuItem};

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("code fence pattern is valid")
});

/// Builds the image generation prompt for a dish
pub fn build_image_prompt(item: &MenuItem) -> String {
    format!(
        "A picture of food for a menu, hyper realistic, highly detailed, {}, {}.",
        item.name, item.description
    )
}

/// Parses the extraction model output into menu items.
///
/// Accepts a bare array, or an object wrapping the array under exactly one
/// array-valued field, optionally inside a Markdown code fence. Every item
/// needs a non-blank name, price and description.
pub fn parse_menu_items(raw: &str) -> Result<Vec<MenuItem>, CoreError> {
    let trimmed = raw.trim();
    let body = CODE_FENCE
        .captures(trimmed)
        .and_then(|captures| captures.get(1))
        .map_or(trimmed, |m| m.as_str());

    let parsed: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Extraction output is not valid JSON: {}", e);
        CoreError::SchemaExtractionFailed
    })?;

    let items = match parsed {
        serde_json::Value::Array(_) => parsed,
        serde_json::Value::Object(fields) => {
            let mut arrays = fields.into_iter().filter(|(_, value)| value.is_array());
            match (arrays.next(), arrays.next()) {
                (Some((_, items)), None) => items,
                (None, _) => {
                    tracing::error!("Extraction output object holds no array of items");
                    return Err(CoreError::SchemaExtractionFailed);
                }
                (Some(_), Some(_)) => {
                    tracing::error!("Extraction output object holds several arrays");
                    return Err(CoreError::SchemaExtractionFailed);
                }
            }
        }
        other => {
            tracing::error!("Unexpected extraction output: {}", other);
            return Err(CoreError::SchemaExtractionFailed);
        }
    };

    let items: Vec<MenuItem> = serde_json::from_value(items).map_err(|e| {
        tracing::error!("Invalid menu items format: {}", e);
        CoreError::SchemaExtractionFailed
    })?;

    if let Some(position) = items.iter().position(|item| {
        [&item.name, &item.price, &item.description]
            .iter()
            .any(|field| field.trim().is_empty())
    }) {
        tracing::error!("Menu item at index {} has a blank field", position);
        return Err(CoreError::SchemaExtractionFailed);
    }

    Ok(items)
}
