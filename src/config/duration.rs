//! Duration string parsing for connection timeouts.
//!
//! Accepts the compact form Temporal tooling uses: one or more
//! `<number><unit>` pairs such as `5s`, `1m30s`, `250ms` or `1.5h`.

use regex_lite::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static WHOLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:ns|us|µs|μs|ms|s|m|h))+$")
        .expect("duration pattern is valid")
});

static PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]*)(?:\.([0-9]*))?(ns|us|µs|μs|ms|s|m|h)").expect("duration part pattern is valid")
});

/// Parse a duration string. Returns `None` for empty, negative or malformed input.
///
/// A bare `0` is accepted as zero.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s == "0" || s == "+0" {
        return Some(Duration::ZERO);
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    if !WHOLE.is_match(s) {
        return None;
    }

    let mut total_nanos: u128 = 0;
    for caps in PART.captures_iter(s) {
        let unit = unit_nanos(caps.get(3)?.as_str());
        let whole = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let frac = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        total_nanos = total_nanos.checked_add(whole.checked_mul(unit)?)?;

        if !frac.is_empty() {
            // Digits past nanosecond precision are dropped.
            let digits = &frac[..frac.len().min(18)];
            let scale = 10u128.pow(digits.len() as u32);
            let frac_value: u128 = digits.parse().ok()?;
            total_nanos = total_nanos.checked_add(frac_value * unit / scale)?;
        }
    }

    u64::try_from(total_nanos).ok().map(Duration::from_nanos)
}

fn unit_nanos(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        _ => 3_600 * 1_000_000_000,
    }
}
