//! Text helpers for table cells.

use roster_types::User;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Width is measured in terminal columns so wide characters (CJK, emoji) are
/// handled correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Formats a phone number as `+1-XXX-XXX-XXXX` from its last ten digits.
///
/// Dataset numbers carry punctuation and extensions ("(555) 867-5309 x1234");
/// numbers with fewer than ten digits are shown as-is.
pub fn format_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 10 {
        return raw.to_string();
    }

    let last10: String = digits[digits.len() - 10..].iter().collect();
    format!("+1-{}-{}-{}", &last10[..3], &last10[3..6], &last10[6..])
}

/// Renders the combined company cell: `"{company} ({city})"`.
pub fn company_city(user: &User) -> String {
    format!("{} ({})", user.company.name, user.address.city)
}
