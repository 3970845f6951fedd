use crate::shared::utils::leading_number;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;
const MS_PER_YEAR: u64 = 365 * MS_PER_DAY;

/// Milliseconds in an `HH:MM:SS` finish time
///
/// Hours, minutes and seconds are read from fixed offsets `[0..2]`,
/// `[3..5]` and `[6..8]`, each taking its leading digits only. A missing or
/// non-numeric field counts as zero, so sentinels such as `DNF` parse to 0.
pub fn parse_finish_time(time: &str) -> u64 {
    let field = |range: std::ops::Range<usize>| {
        time.get(range)
            .and_then(leading_number)
            .unwrap_or(0)
    };

    let seconds = field(0..2) * 3_600 + field(3..5) * 60 + field(6..8);
    seconds * MS_PER_SECOND
}

/// Compact human duration such as `"1h 2m 3s"` or `"250ms"`
///
/// Zero-valued parts are omitted. Seconds keep one decimal place with a
/// trailing `.0` dropped.
pub fn format_duration(ms: u64) -> String {
    if ms < MS_PER_SECOND {
        return format!("{}ms", ms);
    }

    let mut parts = Vec::new();
    let mut rest = ms;
    for (unit, suffix) in [
        (MS_PER_YEAR, "y"),
        (MS_PER_DAY, "d"),
        (MS_PER_HOUR, "h"),
        (MS_PER_MINUTE, "m"),
    ] {
        let value = rest / unit;
        rest %= unit;
        if value > 0 {
            parts.push(format!("{}{}", value, suffix));
        }
    }

    if rest > 0 {
        let tenths = rest / 100;
        let seconds = if tenths % 10 == 0 {
            format!("{}", tenths / 10)
        } else {
            format!("{}.{}", tenths / 10, tenths % 10)
        };
        if seconds != "0" {
            parts.push(format!("{}s", seconds));
        }
    }

    parts.join(" ")
}

/// Pretty form of a finish time string
pub fn pretty_finish_time(time: &str) -> String {
    format_duration(parse_finish_time(time))
}

/// Gap between a runner and the leader, empty when not behind
pub fn time_from_first(leader_time: &str, runner_time: &str) -> String {
    let leader = parse_finish_time(leader_time);
    let runner = parse_finish_time(runner_time);
    if runner <= leader {
        return String::new();
    }
    format_duration(runner - leader)
}
