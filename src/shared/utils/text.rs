/// Upper-case the first letter of every word, leaving the rest untouched
///
/// A word starts after whitespace, a hyphen or an apostrophe, so
/// `"mary-jane o'neil"` becomes `"Mary-Jane O'Neil"` and `"Pennine AC"` is
/// left as it is.
pub fn upper_case_words(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for ch in value.chars() {
        if at_word_start && ch.is_alphabetic() {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        at_word_start = ch.is_whitespace() || ch == '-' || ch == '\'';
    }

    result
}

/// Collapse internal whitespace runs to one space and trim the ends
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Parse the leading ASCII digits of `value`, ignoring anything after them
///
/// Returns `None` when the string does not start with a digit.
pub fn leading_number(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_case_words() {
        assert_eq!(upper_case_words("john smith"), "John Smith");
        assert_eq!(upper_case_words("mary-jane o'neil"), "Mary-Jane O'Neil");
        assert_eq!(upper_case_words("Pennine AC"), "Pennine AC");
        assert_eq!(upper_case_words(""), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  John   Smith \t"), "John Smith");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12"), Some(12));
        assert_eq!(leading_number("1:"), Some(1));
        assert_eq!(leading_number("DN"), None);
        assert_eq!(leading_number(""), None);
    }
}
