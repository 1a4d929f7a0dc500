use super::{Command, User};

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Free text that is not a command
    Text(String),
    /// A recognised slash command
    Command(Command),
    /// A slash command the bot does not know
    UnknownCommand(String),
    /// Inline keyboard button press
    CallbackData { callback_id: String, data: String },
    Empty,
}

impl Content {
    /// Short description for logs, never the full user text
    pub fn preview(&self) -> String {
        match self {
            Content::Text(s) => s.chars().take(50).collect(),
            Content::Command(cmd) => format!("/{}", cmd.kind.as_str()),
            Content::UnknownCommand(name) => format!("/{} (unknown)", name),
            Content::CallbackData { data, .. } => format!("[callback {}]", data),
            Content::Empty => "[empty]".to_string(),
        }
    }
}

/// An inbound message, scoped to a single update
#[derive(Debug, Clone)]
pub struct Message {
    pub chat_id: String,
    pub sender: Option<User>,
    pub content: Content,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        Self {
            chat_id: chat_id.into(),
            sender: None,
            content,
        }
    }

    pub fn from_command(chat_id: impl Into<String>, command: Command) -> Self {
        Self::new(chat_id, Content::Command(command))
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }
}
