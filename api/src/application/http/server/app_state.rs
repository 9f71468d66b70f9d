use std::sync::Arc;

use menugen_core::application::MenugenService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MenugenService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MenugenService) -> Self {
        Self { args, service }
    }
}
