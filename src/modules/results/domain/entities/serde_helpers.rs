//! Lenient field decoding for hand-maintained result documents, where the
//! same field is a JSON string in some years and a number in others.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

/// Accept a string, an integer, a float or null; null becomes `""`
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Str(s)) => s,
        Some(StringOrNumber::Int(i)) => i.to_string(),
        Some(StringOrNumber::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

/// Accept a count as string or number; anything unparseable becomes `None`
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Str(s)) => s.trim().parse().ok(),
        Some(StringOrNumber::Int(i)) => u32::try_from(i).ok(),
        Some(StringOrNumber::Float(f)) if f >= 0.0 => Some(f as u32),
        _ => None,
    })
}

/// Accept a measurement as string or number; anything unparseable becomes `0.0`
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        Some(StringOrNumber::Str(s)) => s.trim().parse().unwrap_or(0.0),
        Some(StringOrNumber::Int(i)) => i as f64,
        Some(StringOrNumber::Float(f)) => f,
        None => 0.0,
    })
}
