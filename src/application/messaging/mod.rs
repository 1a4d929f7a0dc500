//! Message handling - parse inbound updates, dispatch commands, format replies

pub mod dispatcher;
pub mod format;
pub mod parser;

pub use dispatcher::CommandDispatcher;
pub use parser::MessageParser;
