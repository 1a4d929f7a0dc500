use crate::domain::entities::CommandRegistry;

/// Service exposing the command registry to the transport
pub struct CommandService {
    registry: CommandRegistry,
}

impl CommandService {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    /// `(command, description)` pairs for Telegram's command menu
    pub fn menu(&self) -> Vec<(String, String)> {
        self.registry
            .all()
            .map(|info| (info.name().to_string(), info.description.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strings::help;

    #[test]
    fn menu_follows_registration_order() {
        let service = CommandService::new(help::default_commands());
        let names: Vec<String> = service.menu().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["start", "help", "ask", "price", "news", "image", "contact"]);
    }
}
