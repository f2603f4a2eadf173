//! Application state shared by all handlers.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::AuthService;

#[derive(Clone)]
pub struct AppState {
    /// Signup and login
    pub auth_service: Arc<dyn AuthService>,
    /// Database handle for health checks; `None` when running in memory
    pub database: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self {
            auth_service,
            database: None,
        }
    }

    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
