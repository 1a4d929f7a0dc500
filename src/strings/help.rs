//! # Help Text
//!
//! Welcome message shown by /start and /help, plus the command menu
//! registered with Telegram.

use crate::domain::entities::{CommandInfo, CommandKind, CommandRegistry};
use crate::domain::traits::KeyboardButton;

pub fn welcome(name: &str) -> String {
    format!(
        concat!(
            "🚀 Hey {name}! Welcome to your smart crypto & gaming buddy!\n",
            "\n",
            "I'm here to help you with:\n",
            "💬 AI Chat - Ask me anything about crypto, gaming, or studies\n",
            "💰 Crypto Prices - Get live market data\n",
            "📰 Latest News - Crypto and gaming headlines\n",
            "🎨 Image Generation - Create awesome images\n",
            "📞 Contact Info - Reach my creator\n",
            "\n",
            "Ready to dive in? Try /ask followed by your question!\n",
            "\n",
            "Examples:\n",
            "• /ask What's the best strategy for DeFi?\n",
            "• /price bitcoin\n",
            "• /news\n",
            "• /image futuristic gaming setup",
        ),
        name = name
    )
}

/// Callback payloads carried by the welcome keyboard
pub mod callbacks {
    pub const PRICES: &str = "prices";
    pub const NEWS: &str = "news";
    pub const IMAGE: &str = "image";
    pub const CONTACT: &str = "contact";
}

pub fn welcome_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![
        vec![KeyboardButton::new("💰 Crypto Prices").with_callback(callbacks::PRICES)],
        vec![KeyboardButton::new("📰 Latest News").with_callback(callbacks::NEWS)],
        vec![KeyboardButton::new("🎨 Generate Image").with_callback(callbacks::IMAGE)],
        vec![KeyboardButton::new("📞 Contact").with_callback(callbacks::CONTACT)],
    ]
}

/// Commands advertised in /help and Telegram's command menu
pub fn default_commands() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(CommandInfo::new(CommandKind::Start, "Start the bot"));
    registry.register(CommandInfo::new(CommandKind::Help, "Show what I can do"));
    registry.register(CommandInfo::new(CommandKind::Ask, "Chat with AI").with_usage("/ask <question>"));
    registry.register(CommandInfo::new(CommandKind::Price, "Crypto price snapshot").with_usage("/price <symbol>"));
    registry.register(CommandInfo::new(CommandKind::News, "Latest crypto & gaming headlines"));
    registry.register(CommandInfo::new(CommandKind::Image, "Generate an image").with_usage("/image <description>"));
    registry.register(CommandInfo::new(CommandKind::Contact, "Reach my creator"));
    registry
}
