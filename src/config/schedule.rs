use std::time::Duration;
use crate::error::{Error, Result};

/// Parse a poll schedule such as `30s`, `15m` or `2h` into a fixed period.
pub fn parse_schedule(expr: &str) -> Result<Duration> {
    let expr = expr.trim();
    let invalid = || Error::ConfigError(format!("invalid poll schedule {:?}, expected e.g. 30s, 15m, 1h", expr));

    let unit = expr.chars().last().ok_or_else(invalid)?;
    let amount: u64 = expr[..expr.len() - unit.len_utf8()]
        .trim()
        .parse()
        .map_err(|_| invalid())?;

    let secs = match unit.to_ascii_lowercase() {
        's' => Some(amount),
        'm' => amount.checked_mul(60),
        'h' => amount.checked_mul(3600),
        _ => None,
    }
    .ok_or_else(invalid)?;

    if secs == 0 {
        return Err(invalid());
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(parse_schedule("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_schedule("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_schedule(" 2H ").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn rejects_garbage() {
        for expr in ["", "m", "15", "0m", "-5m", "0 */15 * * * *", "1.5h", "15x"] {
            assert!(matches!(parse_schedule(expr), Err(Error::ConfigError(_))), "{expr}");
        }
    }
}
