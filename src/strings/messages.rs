//! # Messages
//!
//! Constant strings and format functions for user-facing replies.

use crate::application::errors::Capability;

pub const ASK_USAGE: &str = concat!(
    "🤔 What's on your mind? Use: /ask <your question>\n",
    "\n",
    "Examples:\n",
    "• /ask Explain blockchain in simple terms\n",
    "• /ask Best gaming laptops under $1000\n",
    "• /ask Help me with calculus derivatives",
);

pub const PRICE_USAGE: &str = concat!(
    "💰 Which crypto are you curious about?\n",
    "\n",
    "Usage: /price <symbol>\n",
    "Examples: /price bitcoin, /price ethereum, /price dogecoin",
);

pub const IMAGE_USAGE: &str = concat!(
    "🎨 What should I create for you?\n",
    "\n",
    "Usage: /image <description>\n",
    "Examples:\n",
    "• /image cyberpunk gaming setup\n",
    "• /image cute crypto mascot\n",
    "• /image futuristic city at sunset",
);

pub const COMMAND_HINT: &str = concat!(
    "🤔 Not sure what you mean. Try:\n",
    "• /ask <question> - Chat with AI\n",
    "• /price <crypto> - Get prices\n",
    "• /news - Latest headlines\n",
    "• /image <description> - Generate images",
);

pub const GREETING: &str = concat!(
    "👋 Hey there! I'm your crypto & gaming buddy. ",
    "Try /ask followed by your question, or use /start to see all commands!",
);

pub const ASK_NOT_CONFIGURED: &str =
    "🤖 AI chat needs configuration. Please contact the admin to set TOGETHER_API_KEY!";
pub const NEWS_NOT_CONFIGURED: &str =
    "📰 News service needs configuration. Please contact the admin to set NEWS_API_KEY!";
pub const IMAGE_NOT_CONFIGURED: &str =
    "🎨 Image generation needs configuration. Please contact the admin to set IMAGE_API_KEY!";

pub const ASK_UNAVAILABLE: &str = "🤖 Oops! My AI brain is taking a quick break. Try again in a moment!";
pub const PRICE_UNAVAILABLE: &str = "💸 Price servers are busy right now. Try again in a moment!";
pub const NEWS_UNAVAILABLE: &str = "📡 News servers are updating. Try again in a moment!";
pub const IMAGE_UNAVAILABLE: &str = "🖼️ Image generation is temporarily offline. Try again later!";

pub const NO_NEWS: &str = "📰 No fresh news available right now. Check back soon!";

pub fn price_not_found(symbol: &str) -> String {
    format!(
        "❌ Couldn't find price data for '{symbol}'. Try using the full name or check the spelling!"
    )
}

pub fn usage_hint(capability: Capability) -> &'static str {
    match capability {
        Capability::Chat => ASK_USAGE,
        Capability::Price => PRICE_USAGE,
        Capability::Image => IMAGE_USAGE,
        Capability::News => COMMAND_HINT,
    }
}

pub fn not_configured(capability: Capability) -> &'static str {
    match capability {
        Capability::Chat => ASK_NOT_CONFIGURED,
        Capability::News => NEWS_NOT_CONFIGURED,
        Capability::Image => IMAGE_NOT_CONFIGURED,
        // Price lookups are public
        Capability::Price => PRICE_UNAVAILABLE,
    }
}

pub fn unavailable(capability: Capability) -> &'static str {
    match capability {
        Capability::Chat => ASK_UNAVAILABLE,
        Capability::Price => PRICE_UNAVAILABLE,
        Capability::News => NEWS_UNAVAILABLE,
        Capability::Image => IMAGE_UNAVAILABLE,
    }
}

/// Telegram caps photo captions at 1024 UTF-16 code units
pub const MAX_CAPTION_UNITS: usize = 1024;

/// Caption for a generated image, cut to fit the caption limit
pub fn image_caption(prompt: &str) -> String {
    let mut caption = String::from("🎨 ");
    let mut units = caption.encode_utf16().count();

    for ch in prompt.chars() {
        units += ch.len_utf16();
        if units > MAX_CAPTION_UNITS {
            break;
        }
        caption.push(ch);
    }

    caption
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompt_is_kept_whole() {
        assert_eq!(image_caption("neon arcade"), "🎨 neon arcade");
    }

    #[test]
    fn caption_fits_telegram_limit_in_utf16_units() {
        let caption = image_caption(&"🎮".repeat(1200));
        assert!(caption.encode_utf16().count() <= MAX_CAPTION_UNITS);
        assert!(caption.starts_with("🎨 🎮"));

        let ascii = image_caption(&"a".repeat(2000));
        assert_eq!(ascii.encode_utf16().count(), MAX_CAPTION_UNITS);
    }
}
