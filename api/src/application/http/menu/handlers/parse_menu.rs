use axum::extract::State;
use menugen_core::domain::menu::{
    entities::MenuItemWithImage, ports::MenuService, value_objects::ParseMenuInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    menu::validators::ParseMenuRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParseMenuResponse {
    pub menu: Vec<MenuItemWithImage>,
}

#[utoipa::path(
    post,
    path = "/parseMenu",
    tag = "menu",
    summary = "Parse a menu picture",
    description = "Reads every dish from a menu picture and illustrates each one with a generated photo",
    request_body = ParseMenuRequest,
    responses(
        (status = 200, body = ParseMenuResponse),
        (status = 400, body = ApiErrorResponse, description = "Missing or invalid menu URL"),
        (status = 500, body = ApiErrorResponse, description = "A model call failed or returned unusable output"),
    ),
)]
pub async fn parse_menu(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ParseMenuRequest>,
) -> Result<Response<ParseMenuResponse>, ApiError> {
    let input = ParseMenuInput::new(payload.menu_url).map_err(ApiError::from)?;

    let menu = state
        .service
        .parse_menu(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ParseMenuResponse { menu }))
}
