//! Services layer: credential store, token issuance/verification, post CRUD
//! with ownership enforcement, and the document-store backends.

mod auth;
mod database;
pub mod error;
mod jwt;
mod posts;
pub mod store;

pub use auth::AuthService;
pub use database::MongoDb;
pub use error::ServiceError;
pub use jwt::{AccessClaims, JwtService, TokenError};
pub use posts::PostService;
