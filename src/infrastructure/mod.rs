//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Vendors: HTTP clients for the chat, price, news and image services
//! - Adapters: Platform integrations (Telegram)

pub mod adapters;
pub mod config;
pub mod vendors;
