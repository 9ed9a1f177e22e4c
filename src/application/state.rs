use crate::db::DbConn;

/// Shared handler state. Owns the pooled store connection opened at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
}

impl AppState {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}
