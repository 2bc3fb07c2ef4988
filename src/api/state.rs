use std::sync::Arc;

use crate::advisor::Advisor;

#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<Advisor>,
    pub default_window: u32,
    pub cors_origin: String,
}
