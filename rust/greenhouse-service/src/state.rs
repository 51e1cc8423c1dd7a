use std::sync::{Arc, Mutex};

use greenhouse_core::Db;

/// Shared handler state. The connection is serialized behind a mutex;
/// handlers never hold the lock across an await point.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Db>>,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self { db: Arc::new(Mutex::new(db)) }
    }
}
