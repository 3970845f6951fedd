use crate::modules::results::domain::RaceCore;

/// Fell race classification such as `"AM"` or `"BS"`
///
/// Climb per kilometre gives the category (`A` from 50 m/km, `B` from
/// 25 m/km, otherwise `C`) and distance gives the length (`S` under 10 km,
/// `M` strictly between 10 and 20 km, `L` from 20 km). Races of exactly
/// 10 km or without a distance fall back to their length in miles, and to
/// an empty string when that is unknown too.
pub fn race_type(race: &RaceCore) -> String {
    let km = race.distance.kilometers;
    let climb = race.climb.meters;

    if km > 0.0 {
        let category = match climb / km {
            ratio if ratio >= 50.0 => "A",
            ratio if ratio >= 25.0 => "B",
            _ => "C",
        };
        let length = if km < 10.0 {
            Some("S")
        } else if km > 10.0 && km < 20.0 {
            Some("M")
        } else if km >= 20.0 {
            Some("L")
        } else {
            None
        };
        if let Some(length) = length {
            return format!("{}{}", category, length);
        }
    }

    miles_label(race.distance.miles)
}

/// Miles truncated to one decimal place, e.g. `"6.2 miles"`
fn miles_label(miles: f64) -> String {
    if miles <= 0.0 || !miles.is_finite() {
        return String::new();
    }
    let truncated = (miles * 10.0).trunc() / 10.0;
    format!("{} miles", truncated)
}
