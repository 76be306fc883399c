//! Decimal size values such as `45` or `10.2`.

use std::{fmt, str::FromStr};

/// A size or precision written as an integer or `int.frac`.
///
/// The integer part is kept as a number so it can be range checked; the
/// fractional part is kept as written (`10.20` stays `10.20`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalSize {
    integer: i64,
    /// Written with a leading `-` (also when the integer part is `0`)
    negative: bool,
    fraction: Option<String>,
}

impl DecimalSize {
    /// Integer part (`8` for `8.2`).
    pub fn integer(&self) -> i64 {
        self.integer
    }

    /// Fractional digits, if any (`"2"` for `8.2`).
    pub fn fraction(&self) -> Option<&str> {
        self.fraction.as_deref()
    }
}

impl FromStr for DecimalSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || format!("invalid attribute size/length '{}'", text);

        let (int_part, fraction) = match text.split_once('.') {
            Some((int_part, frac)) => {
                if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                (int_part, Some(frac.to_string()))
            }
            None => (text, None),
        };

        let digits = int_part.strip_prefix(['-', '+']).unwrap_or(int_part);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let integer = int_part.parse::<i64>().map_err(|_| invalid())?;

        Ok(Self {
            integer,
            negative: int_part.starts_with('-'),
            fraction,
        })
    }
}

impl fmt::Display for DecimalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{}", sign, self.integer.unsigned_abs())?;
        match &self.fraction {
            Some(frac) => write!(f, ".{}", frac),
            None => Ok(()),
        }
    }
}
