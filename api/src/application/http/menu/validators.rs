use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParseMenuRequest {
    #[validate(
        required(message = "No menu URL provided"),
        length(min = 1, message = "No menu URL provided")
    )]
    #[schema(example = "https://example.com/menu.jpg")]
    pub menu_url: Option<String>,
}
