//! Application state shared across handlers

use std::sync::Arc;

use crate::repositories::UserStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(user_repository: Arc<dyn UserStore>) -> Self {
        Self { user_repository }
    }
}
