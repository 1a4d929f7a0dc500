//! User-facing text

pub mod help;
pub mod messages;
