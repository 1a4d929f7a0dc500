//! Domain entities - request-scoped values, nothing here outlives one update

pub mod user;
pub mod message;
pub mod command;
pub mod reply;

pub use user::User;
pub use message::{Message, Content};
pub use command::{Command, CommandKind, CommandInfo, CommandRegistry};
pub use reply::{Reply, TextFormat, ChatAction, VendorResponse};
