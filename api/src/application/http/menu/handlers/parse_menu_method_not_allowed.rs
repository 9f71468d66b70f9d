use crate::application::http::server::api_entities::api_error::{ApiError, ApiErrorResponse};

#[utoipa::path(
    get,
    path = "/parseMenu",
    tag = "menu",
    summary = "Not supported",
    responses(
        (status = 405, body = ApiErrorResponse)
    ),
)]
pub async fn parse_menu_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
