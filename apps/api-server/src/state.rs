//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    BlogRepository, CommentRepository, Mailer, PasswordService, TagRepository, TokenService,
    UserRepository,
};
use scribe_infra::{Argon2PasswordService, InMemoryDatabase, JwtTokenService, build_mailer};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let mailer = build_mailer(&config.mail);

        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match scribe_infra::connect(db_config).await {
                Ok(db) => {
                    use scribe_infra::{
                        PostgresBlogRepository, PostgresCommentRepository, PostgresTagRepository,
                        PostgresUserRepository,
                    };

                    Self {
                        users: Arc::new(PostgresUserRepository::new(db.clone())),
                        blogs: Arc::new(PostgresBlogRepository::new(db.clone())),
                        tags: Arc::new(PostgresTagRepository::new(db.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(db)),
                        mailer,
                        tokens,
                        passwords: Arc::new(Argon2PasswordService::default()),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory(mailer, tokens)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory(mailer, tokens)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::in_memory(mailer, tokens)
        };

        tracing::info!("Application state initialized");
        state
    }

    /// State backed by a single [`InMemoryDatabase`].
    pub fn in_memory(mailer: Arc<dyn Mailer>, tokens: Arc<dyn TokenService>) -> Self {
        let store = Arc::new(InMemoryDatabase::new());

        Self {
            users: store.clone(),
            blogs: store.clone(),
            tags: store.clone(),
            comments: store,
            mailer,
            tokens,
            passwords: Arc::new(Argon2PasswordService::default()),
        }
    }
}
