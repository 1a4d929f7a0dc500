//! Reply formatting - pure functions of parsed vendor data
//!
//! Formatted replies use Telegram's HTML subset, so every vendor or user
//! supplied string goes through [`escape_html`].

use chrono::DateTime;

use crate::infrastructure::config::ContactConfig;
use crate::infrastructure::vendors::{Headline, PriceQuote};

/// Telegram's limit for a single text message, in UTF-16 code units
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Split text into consecutive chunks of at most `max_units` UTF-16 code units
///
/// Characters are never cut in half, so a chunk holds at most `max_units`
/// characters as well.
pub fn split_message(text: &str, max_units: usize) -> Vec<String> {
    if max_units == 0 || text.is_empty() {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut units = 0;

    for ch in text.chars() {
        let len = ch.len_utf16();
        if units + len > max_units && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            units = 0;
        }
        current.push(ch);
        units += len;
    }
    chunks.push(current);

    chunks
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Format a number with comma thousands separators and fixed decimals
pub fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Rounding can turn a tiny negative into zero; no "-0.00"
    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn change_glyph(change: f64) -> &'static str {
    if change > 0.0 {
        "📈"
    } else if change < 0.0 {
        "📉"
    } else {
        "➡️"
    }
}

pub fn format_price(quote: &PriceQuote) -> String {
    let price = quote
        .price
        .map(|p| format!("${} USD", group_thousands(p, 2)))
        .unwrap_or_else(|| "N/A".to_string());
    let market_cap = quote
        .market_cap
        .map(|m| format!("${} USD", group_thousands(m, 0)))
        .unwrap_or_else(|| "N/A".to_string());
    let change = quote.change_24h;
    let sign = if change > 0.0 { "+" } else { "" };

    let mut text = format!(
        "💰 <b>{symbol} Price Update</b>\n\
         \n\
         💵 <b>Price:</b> {price}\n\
         {glyph} <b>24h Change:</b> {sign}{change:.2}%\n\
         📊 <b>Market Cap:</b> {market_cap}",
        symbol = escape_html(&quote.symbol.to_uppercase()),
        glyph = change_glyph(change),
    );

    if let Some(updated) = quote.last_updated_at.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
        text.push_str(&format!("\n\n🕒 <b>Updated:</b> {}", updated.format("%H:%M UTC")));
    }

    text
}

pub fn format_news(headlines: &[Headline]) -> String {
    let mut text = String::from("📰 <b>Latest Headlines:</b>");

    for (i, headline) in headlines.iter().enumerate() {
        text.push_str(&format!(
            "\n\n<b>{}. {}</b>\n🔗 Source: {}",
            i + 1,
            escape_html(&headline.title),
            escape_html(&headline.source),
        ));
        if let Some(url) = &headline.url {
            text.push_str(&format!("\n📖 <a href=\"{}\">Read more</a>", escape_html(url)));
        }
    }

    text
}

pub fn format_contact(contact: &ContactConfig) -> String {
    format!(
        "📞 <b>Contact Information</b>\n\
         \n\
         💌 <b>Email:</b> {email}\n\
         📱 <b>WhatsApp:</b> {whatsapp}\n\
         \n\
         🚀 <b>About this bot:</b>\n\
         Built with love for the crypto &amp; gaming community!\n\
         Powered by AI and real-time data feeds.\n\
         \n\
         💡 <b>Feedback &amp; Suggestions:</b>\n\
         Feel free to reach out with ideas or bug reports!",
        email = escape_html(&contact.email),
        whatsapp = escape_html(&contact.whatsapp),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(change: f64) -> PriceQuote {
        PriceQuote {
            symbol: "bitcoin".to_string(),
            price: Some(67234.5),
            change_24h: change,
            market_cap: Some(1_324_567_890_123.4),
            last_updated_at: Some(1_700_000_000),
        }
    }

    #[test]
    fn split_exact_boundaries() {
        let text = "a".repeat(5000);
        let chunks = split_message(&text, MAX_MESSAGE_CHARS);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 4096);
        assert_eq!(chunks[1].chars().count(), 904);

        assert_eq!(split_message(&"b".repeat(4096), MAX_MESSAGE_CHARS).len(), 1);
        assert_eq!(split_message("short", MAX_MESSAGE_CHARS), vec!["short".to_string()]);
    }

    #[test]
    fn split_counts_characters_not_bytes() {
        let text = "é".repeat(4097);
        let chunks = split_message(&text, MAX_MESSAGE_CHARS);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "é");
    }

    #[test]
    fn split_respects_utf16_length() {
        let text = "🎮".repeat(2049);
        let chunks = split_message(&text, MAX_MESSAGE_CHARS);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].encode_utf16().count(), 4096);
        assert_eq!(chunks[1], "🎮");
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(67234.5, 2), "67,234.50");
        assert_eq!(group_thousands(0.08123, 2), "0.08");
        assert_eq!(group_thousands(1_324_567_890_123.4, 0), "1,324,567,890,123");
        assert_eq!(group_thousands(999.999, 2), "1,000.00");
        assert_eq!(group_thousands(-1234.5, 1), "-1,234.5");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn price_reply_contents() {
        let up = format_price(&quote(2.346));
        assert!(up.contains("BITCOIN Price Update"));
        assert!(up.contains("$67,234.50 USD"));
        assert!(up.contains("📈 <b>24h Change:</b> +2.35%"));
        assert!(up.contains("$1,324,567,890,123 USD"));
        assert!(up.contains("22:13 UTC"));

        assert!(format_price(&quote(-1.2)).contains("📉 <b>24h Change:</b> -1.20%"));
        assert!(format_price(&quote(0.0)).contains("➡️ <b>24h Change:</b> 0.00%"));
    }

    #[test]
    fn price_reply_without_optional_fields() {
        let text = format_price(&PriceQuote {
            symbol: "obscure".to_string(),
            price: None,
            change_24h: 0.0,
            market_cap: None,
            last_updated_at: None,
        });
        assert!(text.contains("<b>Price:</b> N/A"));
        assert!(text.contains("<b>Market Cap:</b> N/A"));
        assert!(!text.contains("Updated"));
    }

    #[test]
    fn news_reply_escapes_and_links() {
        let headlines = vec![
            Headline {
                title: "Bitcoin <surges> & more".to_string(),
                source: "Wire".to_string(),
                url: Some("https://n.example/a?x=1&y=2".to_string()),
            },
            Headline { title: "No link".to_string(), source: "Desk".to_string(), url: None },
        ];
        let text = format_news(&headlines);
        assert!(text.starts_with("📰 <b>Latest Headlines:</b>"));
        assert!(text.contains("<b>1. Bitcoin &lt;surges&gt; &amp; more</b>"));
        assert!(text.contains("<a href=\"https://n.example/a?x=1&amp;y=2\">Read more</a>"));
        assert!(text.contains("<b>2. No link</b>\n🔗 Source: Desk"));
        assert_eq!(text.matches("Read more").count(), 1);
    }

    #[test]
    fn formatting_is_deterministic() {
        assert_eq!(format_price(&quote(1.0)), format_price(&quote(1.0)));
    }

    #[test]
    fn contact_block_is_valid_html() {
        let text = format_contact(&ContactConfig::default());
        assert!(text.contains("your.email@example.com"));
        assert!(text.contains("crypto &amp; gaming"));
        assert!(!text.contains(" & "));
    }
}
