//! Splits long replies to fit Telegram's per-message text limit.

/// Max characters Telegram accepts in one text message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Splits `text` into parts of at most `max_chars` characters, breaking at whitespace
/// when one is available in the back half of a part. Text that fits comes back as one part.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut parts = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let cut = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let split_at = rest[..cut]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, _)| i)
            .filter(|&i| i > 0 && i >= cut / 2)
            .unwrap_or(cut);

        let (part, tail) = rest.split_at(split_at);
        let part = part.trim_end();
        if !part.is_empty() {
            parts.push(part.to_string());
        }
        rest = tail.trim_start();
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest.to_string());
    }
    parts
}
