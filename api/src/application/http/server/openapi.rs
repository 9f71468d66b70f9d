use crate::application::http::{health::HealthApiDoc, menu::router::MenuApiDoc};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Menugen API"
    ),
    nest(
        (path = "/api", api = MenuApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
