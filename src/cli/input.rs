//! Parsing of terminal answers.

use std::str::FromStr;

/// Trimmed answer, `None` when blank.
pub fn optional_text(answer: &str) -> Option<String> {
    let answer = answer.trim();
    (!answer.is_empty()).then(|| answer.to_string())
}

/// Blank is `None`; anything else must parse.
pub fn optional_number<T: FromStr>(answer: &str) -> Result<Option<T>, String> {
    match optional_text(answer) {
        None => Ok(None),
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("'{text}' is not a valid number")),
    }
}

/// Comma separated list with blanks dropped.
pub fn list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .filter_map(optional_text)
        .collect()
}

pub fn is_back(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("back")
}

pub fn is_yes(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    }
}
