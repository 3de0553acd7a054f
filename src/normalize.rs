//! Text normalization shared by corpus loading and query scoring.
//!
//! Every count in the model is taken over normalized text, and every query
//! is normalized the same way before it is scored, so both sides live in the
//! same token space.

/// Characters treated as noise. Each one is replaced by a space.
pub const SYMBOLS: &str = "~!@#$%^&*-+={\\}()[].,:;/|<>?'\"_1234567890\n";

/// Strip symbols, collapse whitespace and drop single-character tokens.
///
/// # Example
/// ```rust
/// use polarity::normalize::normalize;
///
/// assert_eq!(normalize("it's a 10/10 film!"), "it film");
/// ```
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if SYMBOLS.contains(c) { ' ' } else { c })
        .collect();

    replaced
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize and split into the word sequence used for scoring.
pub fn words(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
