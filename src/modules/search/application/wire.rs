use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Separates selected runners in an encoded runner query
pub const RUNNER_DELIMITER: &str = "$$";
/// Separates a runner's display name from their club
pub const NAME_CLUB_SEPARATOR: &str = " - ";
/// Separates race name groups in an encoded race filter
pub const RACE_GROUP_DELIMITER: &str = "||";
/// Separates spellings inside one group
pub const VARIANT_DELIMITER: &str = "|";

static HTML_ENTITY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").ok());

/// A runner selection taken from autocomplete: `"<name> - <club>"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRunner {
    pub name: String,
    pub club: String,
}

/// Split a `$$`-delimited runner query into its selections
///
/// Entries are sorted first so the same selection in a different order
/// decodes identically. Entries without a club separator are dropped.
pub fn decode_runner_selections(encoded: &str) -> Vec<SelectedRunner> {
    let mut entries: Vec<&str> = encoded
        .split(RUNNER_DELIMITER)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    entries.sort_unstable();
    entries.dedup();

    entries
        .into_iter()
        .filter_map(|entry| {
            let (name, club) = entry.split_once(NAME_CLUB_SEPARATOR)?;
            Some(SelectedRunner {
                name: name.trim().to_string(),
                club: club.trim().to_string(),
            })
        })
        .collect()
}

/// Flatten an encoded race filter into its race names
///
/// HTML entities are decoded, then groups split on `||` and spellings on
/// `|`. Blank names are dropped.
pub fn decode_race_names(encoded: &str) -> Vec<String> {
    decode_html_entities(encoded)
        .split(RACE_GROUP_DELIMITER)
        .flat_map(|group| group.split(VARIANT_DELIMITER))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode named and numeric HTML character references
///
/// Unknown named references are left as they are.
pub fn decode_html_entities(value: &str) -> String {
    let Some(regex) = HTML_ENTITY.as_ref() else {
        return value.to_string();
    };

    regex
        .replace_all(value, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "rsquo" | "lsquo" => '\'',
        "ndash" => '-',
        _ => return None,
    };
    Some(c)
}
