//! Common text predicates shared by the classifier and the literal rewriter.

use std::sync::LazyLock;

use regex::Regex;

static MULTI_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[a-z]+(?:\s[a-z]+)+").expect("valid multi-word regex"));

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use i18nize::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(contains_alphabetic("Hello123"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("---"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Checks if the text reads like a phrase rather than a token.
///
/// The trimmed text must be non-empty, contain a space and hold at least two
/// whitespace-separated runs of letters. Identifiers, enum values, numbers and
/// single words are rejected.
///
/// ```
/// use i18nize::utils::is_multi_word;
///
/// assert!(is_multi_word("Submit Now"));
/// assert!(!is_multi_word("Submit"));
/// assert!(!is_multi_word("10 20"));
/// ```
pub fn is_multi_word(text: &str) -> bool {
    !text.trim().is_empty() && text.contains(' ') && MULTI_WORD.is_match(text)
}

/// Checks if the first character is an uppercase letter.
pub fn starts_with_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
