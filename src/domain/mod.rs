//! Domain layer - Core chat objects with no transport or vendor details
//! 
//! This layer contains:
//! - Entities: Commands, inbound messages, outbound replies
//! - Traits: Abstraction over the messaging transport (Bot)

pub mod entities;
pub mod traits;
