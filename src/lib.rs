//! buddy-bot - a Telegram assistant for crypto, gaming and news
//!
//! Layers follow the usual split: `domain` holds entities and the `Bot`
//! trait, `application` parses and dispatches commands, `infrastructure`
//! talks to Telegram and the vendor APIs.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod strings;
