use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::seed::seed_if_empty;
use crate::database::{MemoryStore, Store};
use crate::middleware::AuthUser;
use crate::server::AppState;

/// In-memory store plus a token issuer built from development config
pub struct TestContext {
    pub config: AppConfig,
    pub store: Arc<dyn Store>,
    pub issuer: TokenIssuer,
}

impl TestContext {
    /// Empty store
    pub async fn new() -> Self {
        let config = AppConfig::development();
        let issuer = TokenIssuer::new(&config.security).expect("development config has a valid JWT key");
        Self {
            config,
            store: Arc::new(MemoryStore::new()),
            issuer,
        }
    }

    /// Store holding the default users and the 52 reference students
    pub async fn seeded() -> Self {
        let ctx = Self::new().await;
        seed_if_empty(ctx.store()).await.expect("seeding the memory store");
        ctx
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn caller(&self) -> AuthUser {
        AuthUser {
            username: "admin".to_string(),
            token_id: "test-token".to_string(),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.config.clone(), self.store.clone())
            .expect("development config builds an app state")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_context_has_reference_data() {
        let ctx = TestContext::seeded().await;
        assert_eq!(ctx.store().list_students().await.unwrap().len(), 52);
        assert_eq!(ctx.app_state().store.backend_name(), "memory");
    }
}
