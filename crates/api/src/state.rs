use std::sync::Arc;

use merch_db::DbPool;

use crate::config::ServerConfig;

/// Handed to every handler through `State<AppState>`; clones share the pool
/// and the configuration.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}
