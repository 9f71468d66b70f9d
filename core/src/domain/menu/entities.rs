use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single dish as coerced by the extraction model.
///
/// Prices and descriptions stay free-form strings: menus print them as
/// `$5`, `5.50 €`, `market price` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl MenuItem {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
        }
    }

    pub fn with_image(self, menu_image: String) -> MenuItemWithImage {
        MenuItemWithImage {
            name: self.name,
            price: self.price,
            description: self.description,
            menu_image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemWithImage {
    pub name: String,
    pub price: String,
    pub description: String,
    /// Base64 encoded picture of the dish.
    pub menu_image: String,
}

/// Stages a single menu parsing run goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Transcribing,
    Coercing,
    Synthesizing,
    Done,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self {
            PipelineStage::Transcribing => "transcribing",
            PipelineStage::Coercing => "coercing",
            PipelineStage::Synthesizing => "synthesizing",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        f.write_str(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_image_is_serialized_in_camel_case() {
        let item = MenuItem::new("Burger", "$5", "Beef burger").with_image("aW1n".to_string());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["menuImage"], "aW1n");
        assert_eq!(value["name"], "Burger");
        assert!(value.get("menu_image").is_none());
    }
}
