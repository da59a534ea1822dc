use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod query;
pub mod response;
pub mod services;
pub mod stats;
pub mod store;

use crate::store::EntityStore;

pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, jwt_secret: impl Into<String>) -> Self {
        AppState {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }
}
