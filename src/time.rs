use crate::error::{ChompError, Result};

/// Parses an FCPXML time value such as `"1001/30000s"`, `"3600s"` or `"12.5"` into seconds.
///
/// Rationals with more than one `/`, zero denominators and non-finite values are rejected.
pub fn parse_fcp_time_seconds(value: &str) -> Result<f64> {
    let trimmed = value.trim();
    let body = trimmed.strip_suffix('s').unwrap_or(trimmed);

    let parse_token = |token: &str| -> Result<f64> {
        let token = token.trim();
        let number = token.parse::<f64>().map_err(|e| {
            ChompError::malformed_time(value, format!("\"{token}\" is not a number ({e})"))
        })?;
        if !number.is_finite() {
            return Err(ChompError::malformed_time(
                value,
                format!("\"{token}\" is not a finite number"),
            ));
        }
        Ok(number)
    };

    let tokens: Vec<&str> = body.split('/').collect();
    match tokens.as_slice() {
        [seconds] => parse_token(seconds),
        [numerator, denominator] => {
            let numerator = parse_token(numerator)?;
            let denominator = parse_token(denominator)?;
            if denominator == 0.0 {
                return Err(ChompError::malformed_time(value, "denominator is zero"));
            }
            Ok(numerator / denominator)
        }
        _ => Err(ChompError::malformed_time(
            value,
            format!(
                "expected a decimal or a numerator/denominator pair, found {} '/'-separated parts",
                tokens.len()
            ),
        )),
    }
}

fn whole_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    }
}

/// `HH:MM:SS`, truncated to whole seconds. Negative input shows as zero.
pub fn format_timecode(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Matroska chapter timestamp, `HH:MM:SS.nnnnnnnnn`.
pub fn format_matroska_timestamp(seconds: f64) -> String {
    let total = whole_seconds(seconds);
    let nanos = if seconds.is_finite() && seconds > 0.0 {
        ((seconds - total as f64) * 1e9).round().min(999_999_999.0) as u64
    } else {
        0
    };
    format!(
        "{:02}:{:02}:{:02}.{:09}",
        total / 3600,
        (total % 3600) / 60,
        total % 60,
        nanos
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parses_plain_decimals() {
        assert_close(parse_fcp_time_seconds("0s").unwrap(), 0.0);
        assert_close(parse_fcp_time_seconds("5s").unwrap(), 5.0);
        assert_close(parse_fcp_time_seconds("12.25s").unwrap(), 12.25);
        assert_close(parse_fcp_time_seconds("7").unwrap(), 7.0);
    }

    #[test]
    fn parses_rationals() {
        assert_close(parse_fcp_time_seconds("1/2s").unwrap(), 0.5);
        assert_close(
            parse_fcp_time_seconds("1001/30000s").unwrap(),
            1001.0 / 30000.0,
        );
        assert_close(parse_fcp_time_seconds("3600/1s").unwrap(), 3600.0);
        assert_close(parse_fcp_time_seconds("-10/5s").unwrap(), -2.0);
    }

    #[test]
    fn rejects_three_part_rationals() {
        let err = parse_fcp_time_seconds("1/2/3s").unwrap_err();
        assert!(matches!(err, ChompError::MalformedTimeValue { ref value, .. } if value == "1/2/3s"));
    }

    #[test]
    fn rejects_zero_denominator() {
        let err = parse_fcp_time_seconds("5/0s").unwrap_err();
        assert!(matches!(err, ChompError::MalformedTimeValue { .. }));
        assert!(err.to_string().contains("denominator is zero"));
    }

    #[test]
    fn rejects_garbage_tokens() {
        for input in ["", "s", "abc", "1/xs", "/2s", "infs", "NaN"] {
            let err = parse_fcp_time_seconds(input).unwrap_err();
            assert!(
                matches!(err, ChompError::MalformedTimeValue { .. }),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn formats_timecodes() {
        assert_eq!(format_timecode(3661.0), "01:01:01");
        assert_eq!(format_timecode(0.0), "00:00:00");
        assert_eq!(format_timecode(59.0), "00:00:59");
        assert_eq!(format_timecode(59.999), "00:00:59");
        assert_eq!(format_timecode(360_000.0), "100:00:00");
        assert_eq!(format_timecode(-3.0), "00:00:00");
    }

    #[test]
    fn formats_matroska_timestamps() {
        assert_eq!(format_matroska_timestamp(0.0), "00:00:00.000000000");
        assert_eq!(format_matroska_timestamp(3661.5), "01:01:01.500000000");
    }
}
