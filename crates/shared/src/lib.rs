//! Shared errors, configuration, and token handling for Merchcoin.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error taxonomy with transport status mapping
//! - Layered configuration management
//! - JWT claims and token service for the authenticated principal

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;


pub use auth::{AuthRequest, AuthResponse, Claims};
pub use config::{AppConfig, LedgerConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
