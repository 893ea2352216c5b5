use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

const MICROS_PER_SECOND: i64 = 1_000_000;

/// A span of connection time, kept as whole microseconds so that sums are
/// exact and independent of the order files are visited in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionTime {
    micros: i64,
}

impl ConnectionTime {
    pub const ZERO: Self = Self { micros: 0 };

    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        // `as` saturates on out-of-range values
        Self {
            micros: (secs * MICROS_PER_SECOND as f64).round() as i64,
        }
    }
}

impl Add for ConnectionTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            micros: self.micros.saturating_add(rhs.micros),
        }
    }
}

impl AddAssign for ConnectionTime {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ConnectionTime {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, t| acc + t)
    }
}

/// `H:MM:SS` with a `.ffffff` suffix when there is a fractional second.
/// Hours keep counting past 24.
impl fmt::Display for ConnectionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let micros = self.micros.unsigned_abs();
        let secs = micros / MICROS_PER_SECOND as u64;
        let frac = micros % MICROS_PER_SECOND as u64;
        let sign = if self.micros < 0 { "-" } else { "" };

        write!(
            f,
            "{sign}{}:{:02}:{:02}",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )?;
        if frac > 0 {
            write!(f, ".{frac:06}")?;
        }
        Ok(())
    }
}

/// Parse `H:MM:SS` / `HH:MM:SS.mmm` into a span of
/// `hours * 3600 + minutes * 60 + seconds` seconds.
///
/// On failure the reason is returned for the caller to wrap with file context.
pub fn parse_connection_time(s: &str) -> Result<ConnectionTime, String> {
    let fields: Vec<&str> = s.trim().split(':').collect();
    if fields.len() != 3 {
        return Err(format!(
            "expected 3 colon-separated fields (H:MM:SS), found {}",
            fields.len()
        ));
    }

    let mut values = [0.0_f64; 3];
    for (value, (field, name)) in values
        .iter_mut()
        .zip(fields.iter().zip(["hours", "minutes", "seconds"]))
    {
        *value = parse_field(field).ok_or_else(|| format!("invalid {name} '{field}'"))?;
    }

    let [hours, minutes, seconds] = values;
    Ok(ConnectionTime::from_secs_f64(
        hours * 3600.0 + minutes * 60.0 + seconds,
    ))
}

fn parse_field(field: &str) -> Option<f64> {
    let field = field.trim();
    // Rust's float parser also takes "inf", "NaN" and exponents
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_fraction() {
        let t = parse_connection_time("0:05:30.000").unwrap();
        assert_eq!(t.micros, 330 * MICROS_PER_SECOND);
        assert_eq!(t.to_string(), "0:05:30");
    }

    #[test]
    fn test_parse_total_seconds_formula() {
        let t = parse_connection_time("12:34:56.789").unwrap();
        assert_eq!(t.micros, (12 * 3600 + 34 * 60 + 56) * MICROS_PER_SECOND + 789_000);
        assert_eq!(t.to_string(), "12:34:56.789000");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = parse_connection_time("1:02:03.456").unwrap();
        let b = parse_connection_time("1:02:03.456").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_accepts_surrounding_whitespace() {
        let t = parse_connection_time("  1:00:00.000\r\n").unwrap();
        assert_eq!(t.micros, 3600 * MICROS_PER_SECOND);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(parse_connection_time("05:30").is_err());
        assert!(parse_connection_time("1:00:00:00").is_err());
        assert!(parse_connection_time("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for bad in ["abc", "a:bc:de", "1:xx:00", "1:00:-5", "inf:00:00", "1:00:1e3", "1::00"] {
            let err = parse_connection_time(bad).unwrap_err();
            assert!(!err.is_empty(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_display_does_not_wrap_at_a_day() {
        let t = ConnectionTime {
            micros: (26 * 3600 + 5 * 60 + 7) * MICROS_PER_SECOND,
        };
        assert_eq!(t.to_string(), "26:05:07");
    }

    #[test]
    fn test_display_keeps_fraction() {
        let t = ConnectionTime { micros: 1_500_000 };
        assert_eq!(t.to_string(), "0:00:01.500000");
    }

    #[test]
    fn test_sum_is_order_independent() {
        let parts: Vec<ConnectionTime> = ["0:00:00.1", "0:00:00.2", "1:59:59.7", "0:00:00.333"]
            .iter()
            .map(|s| parse_connection_time(s).unwrap())
            .collect();

        let forward: ConnectionTime = parts.iter().copied().sum();
        let backward: ConnectionTime = parts.iter().rev().copied().sum();
        assert_eq!(forward, backward);
        assert_eq!(forward.to_string(), "2:00:00.333000");
    }
}
