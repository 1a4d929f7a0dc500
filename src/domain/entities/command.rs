/// Commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Start,
    Help,
    Ask,
    Price,
    News,
    Image,
    Contact,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        CommandKind::Start,
        CommandKind::Help,
        CommandKind::Ask,
        CommandKind::Price,
        CommandKind::News,
        CommandKind::Image,
        CommandKind::Contact,
    ];

    /// Look up a command by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Help => "help",
            CommandKind::Ask => "ask",
            CommandKind::Price => "price",
            CommandKind::News => "news",
            CommandKind::Image => "image",
            CommandKind::Contact => "contact",
        }
    }

    /// Whether the command is useless without argument text
    pub fn requires_argument(&self) -> bool {
        matches!(self, CommandKind::Ask | CommandKind::Price | CommandKind::Image)
    }
}

/// A parsed bot command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// Everything after the command name, trimmed
    pub raw_args: String,
}

impl Command {
    pub fn new(kind: CommandKind, raw_args: impl Into<String>) -> Self {
        Self {
            kind,
            raw_args: raw_args.into().trim().to_string(),
        }
    }

    pub fn has_args(&self) -> bool {
        !self.raw_args.is_empty()
    }

    /// First whitespace separated argument
    pub fn first_arg(&self) -> Option<&str> {
        self.raw_args.split_whitespace().next()
    }
}

/// Describes a command for /help and for Telegram's command menu
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub kind: CommandKind,
    pub description: String,
    pub usage: Option<String>,
}

impl CommandInfo {
    pub fn new(kind: CommandKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

/// Registry of the commands advertised to users, kept in registration order
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandInfo>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, info: CommandInfo) {
        self.commands.retain(|c| c.kind != info.kind);
        self.commands.push(info);
    }

    pub fn get(&self, kind: CommandKind) -> Option<&CommandInfo> {
        self.commands.iter().find(|c| c.kind == kind)
    }

    pub fn all(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(CommandKind::from_name("PRICE"), Some(CommandKind::Price));
        assert_eq!(CommandKind::from_name("version"), None);
    }

    #[test]
    fn command_trims_arguments() {
        let cmd = Command::new(CommandKind::Price, "  Bitcoin  extra ");
        assert_eq!(cmd.raw_args, "Bitcoin  extra");
        assert_eq!(cmd.first_arg(), Some("Bitcoin"));
        assert!(!Command::new(CommandKind::Ask, "   ").has_args());
    }

    #[test]
    fn only_vendor_lookups_need_arguments() {
        let needing: Vec<CommandKind> = CommandKind::ALL.into_iter().filter(|k| k.requires_argument()).collect();
        assert_eq!(needing, vec![CommandKind::Ask, CommandKind::Price, CommandKind::Image]);
    }

    #[test]
    fn registry_replaces_existing_entry() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandInfo::new(CommandKind::News, "old"));
        registry.register(CommandInfo::new(CommandKind::News, "new"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(CommandKind::News).map(|c| c.description.as_str()), Some("new"));
    }
}
