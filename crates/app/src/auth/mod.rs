//! Tenant API token authentication

mod errors;
mod models;
pub mod openbao;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use openbao::{OpenBaoClient, OpenBaoConfig, OpenBaoError, TokenHasher};
pub use repository::PgAuthRepository;
pub use service::*;
pub use token::*;
