//! Catalog key segments derived from source text.

use deunicode::deunicode_char;

/// Lowercase words of `text` joined by `_`.
///
/// Latin letters with diacritics are reduced to their base letters and
/// apostrophes are removed first. Words are then runs of letters or digits. A
/// run is further split where a lowercase letter or digit is followed by an
/// uppercase letter, between letters and digits, and before the last capital
/// of an acronym that is followed by a lowercase letter.
///
/// ```
/// use i18nize::core::rewrite::slugify;
///
/// assert_eq!(slugify("Hello there"), "hello_there");
/// assert_eq!(slugify("Don't save!"), "dont_save");
/// assert_eq!(slugify("Grüße dich"), "grusse_dich");
/// assert_eq!(slugify("XMLHttpRequest"), "xml_http_request");
/// ```
pub fn slugify(text: &str) -> String {
    words(&deburr(text))
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Latin-1 Supplement and Latin Extended-A letters.
const LATIN_LETTERS: std::ops::RangeInclusive<char> = '\u{c0}'..='\u{17f}';

/// Combining diacritical marks.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{300}'..='\u{36f}';

/// Reduce accented Latin letters to ASCII, drop combining marks and
/// apostrophes. Other scripts are kept as they are.
fn deburr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\'' || c == '\u{2019}' || COMBINING_MARKS.contains(&c) {
            continue;
        }
        match deunicode_char(c) {
            Some(ascii) if LATIN_LETTERS.contains(&c) && c != '\u{d7}' && c != '\u{f7}' => {
                out.push_str(ascii)
            }
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
    Other,
}

fn class_of(c: char) -> CharClass {
    if c.is_numeric() {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else if c.is_alphabetic() {
        CharClass::Lower
    } else {
        CharClass::Other
    }
}

fn words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let class = class_of(c);
        if class == CharClass::Other {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p))
            && !current.is_empty()
        {
            let prev_class = class_of(prev);
            let next_class = chars.get(i + 1).map(|&n| class_of(n));
            let boundary = match (prev_class, class) {
                (CharClass::Lower, CharClass::Upper) => true,
                (CharClass::Digit, CharClass::Upper | CharClass::Lower) => true,
                (CharClass::Upper | CharClass::Lower, CharClass::Digit) => true,
                // "XMLHttp": split before the "H" that starts a capitalised word
                (CharClass::Upper, CharClass::Upper) => next_class == Some(CharClass::Lower),
                _ => false,
            };
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_sentence() {
        assert_eq!(slugify("Hello there"), "hello_there");
        assert_eq!(slugify("  Save your changes  "), "save_your_changes");
    }

    #[test]
    fn test_punctuation_is_dropped() {
        assert_eq!(slugify("Are you sure?"), "are_you_sure");
        assert_eq!(slugify("Name:"), "name");
        assert_eq!(slugify("e-mail address"), "e_mail_address");
    }

    #[test]
    fn test_case_boundaries() {
        assert_eq!(slugify("fooBar"), "foo_bar");
        assert_eq!(slugify("FOO BAR"), "foo_bar");
        assert_eq!(slugify("XMLHttpRequest"), "xml_http_request");
    }

    #[test]
    fn test_digit_boundaries() {
        assert_eq!(slugify("Step 2 of 3"), "step_2_of_3");
        assert_eq!(slugify("Hello2World"), "hello_2_world");
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(slugify("Grüße dich"), "grusse_dich");
        assert_eq!(slugify("Crème Brûlée"), "creme_brulee");
        assert_eq!(slugify("Łódź"), "lodz");
        assert_eq!(slugify("你好"), "你好");
    }

    #[test]
    fn test_apostrophes_are_removed() {
        assert_eq!(slugify("Don't save!"), "dont_save");
        assert_eq!(slugify("We\u{2019}re done"), "were_done");
        assert_eq!(
            slugify("Terms & conditions don't apply"),
            "terms_conditions_dont_apply"
        );
    }

    #[test]
    fn test_combining_marks_are_removed() {
        assert_eq!(slugify("Cafe\u{301} open"), "cafe_open");
    }

    #[test]
    fn test_no_words() {
        assert_eq!(slugify("—"), "");
        assert_eq!(slugify("   "), "");
    }
}
