use serde_json::json;

pub const MENU_TRANSCRIPTION_PROMPT: &str = r#"You are given an image of a menu. Your job is to take each item in the menu and convert it into the following JSON format:

[{"name": "name of menu item", "price": "price of the menu item", "description": "description of menu item"}, ...]

Please make sure to include all items in the menu and include a price (if it exists) & a description (if it exists). ALSO PLEASE ONLY RETURN JSON. IT'S VERY IMPORTANT FOR MY JOB THAT YOU ONLY RETURN JSON.
"#;

pub const MENU_EXTRACTION_PROMPT: &str =
    "The following is a list of items from a menu. Only answer in JSON.";

/// Returns the JSON schema handed to the extraction model
pub fn get_menu_schema() -> serde_json::Value {
    json!({
        "$ref": "#/definitions/menuSchema",
        "definitions": {
            "menuSchema": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "The name of the menu item"
                        },
                        "price": {
                            "type": "string",
                            "description": "The price of the menu item"
                        },
                        "description": {
                            "type": "string",
                            "description": "The description of the menu item. If this doesn't exist, please write a short one sentence description."
                        }
                    },
                    "required": ["name", "price", "description"],
                    "additionalProperties": false
                }
            }
        },
        "$schema": "http://json-schema.org/draft-07/schema#"
    })
}
