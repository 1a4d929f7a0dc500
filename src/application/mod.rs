//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: bot, vendor and configuration errors
//! - Messaging: parsing, command dispatch, reply formatting
//! - Services: reply delivery and the command menu

pub mod errors;
pub mod messaging;
pub mod services;
