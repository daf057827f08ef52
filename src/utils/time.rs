//! Human-readable elapsed time for run labels.

use chrono::{DateTime, Duration, Utc};

/// Time since `start`, rounded to the nearest second.
/// Negative spans (clock skew) are clamped to zero.
pub fn elapsed_since(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_elapsed(now - start)
}

/// Compact `h/m/s` rendering: `45s`, `3m7s`, `2h0m5s`.
pub fn format_elapsed(duration: Duration) -> String {
    let millis = duration.num_milliseconds().max(0);
    let total = (millis + 500) / 1000;

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::zero()), "0s");
        assert_eq!(format_elapsed(Duration::seconds(45)), "45s");
        assert_eq!(format_elapsed(Duration::seconds(187)), "3m7s");
        assert_eq!(format_elapsed(Duration::seconds(7205)), "2h0m5s");
        assert_eq!(format_elapsed(Duration::hours(50)), "50h0m0s");
    }

    #[test]
    fn test_rounds_to_nearest_second() {
        assert_eq!(format_elapsed(Duration::milliseconds(59_499)), "59s");
        assert_eq!(format_elapsed(Duration::milliseconds(59_500)), "1m0s");
    }

    #[test]
    fn test_future_start_clamps_to_zero() {
        let now = Utc::now();
        assert_eq!(elapsed_since(now + Duration::minutes(2), now), "0s");
    }
}
