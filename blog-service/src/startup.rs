use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use service_core::error::AppError;
use tokio::net::TcpListener;

use crate::build_router;
use crate::config::{BlogConfig, StoreBackend};
use crate::services::store::{MemoryStore, PostStore, StoreHealth, UserStore};
use crate::services::{AuthService, JwtService, MongoDb, PostService};

#[derive(Clone)]
pub struct AppState {
    pub config: BlogConfig,
    pub jwt: JwtService,
    pub auth: AuthService,
    pub posts: PostService,
    pub health: Arc<dyn StoreHealth>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: BlogConfig) -> Result<Self, AppError> {
        let (users, posts, health): (
            Arc<dyn UserStore>,
            Arc<dyn PostStore>,
            Arc<dyn StoreHealth>,
        ) = match config.store.backend {
            StoreBackend::MongoDb => {
                let db = MongoDb::connect(&config.store.mongodb.uri, &config.store.mongodb.database)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to connect to MongoDB: {}", e);
                        e
                    })?;
                db.initialize_indexes().await.map_err(|e| {
                    tracing::error!("Failed to initialize database indexes: {}", e);
                    e
                })?;
                let db = Arc::new(db);
                (db.clone(), db.clone(), db)
            }
            StoreBackend::Memory => {
                tracing::info!("Using in-memory store");
                let store = Arc::new(MemoryStore::new());
                (store.clone(), store.clone(), store)
            }
        };

        let jwt = JwtService::new(&config.jwt);
        let auth = AuthService::new(users, jwt.clone());
        let posts = PostService::new(posts);

        let state = AppState {
            config: config.clone(),
            jwt,
            auth,
            posts,
            health,
        };

        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
