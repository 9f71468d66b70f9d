use super::handlers::{
    parse_menu::{__path_parse_menu, parse_menu},
    parse_menu_method_not_allowed::{
        __path_parse_menu_method_not_allowed, parse_menu_method_not_allowed,
    },
};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(parse_menu, parse_menu_method_not_allowed))]
pub struct MenuApiDoc;

pub fn menu_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/parseMenu", state.args.server.root_path),
        post(parse_menu).get(parse_menu_method_not_allowed),
    )
}
