//! Capture duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default capture length in seconds
pub const DEFAULT_DURATION_SECS: u64 = 10;

/// How long a capture runs before it is stopped automatically.
/// Always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn default_duration() -> Self {
        Self::from_secs(DEFAULT_DURATION_SECS)
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Number of samples this duration spans at `sample_rate`
    pub fn samples_at(&self, sample_rate: u32) -> u64 {
        self.milliseconds * u64::from(sample_rate) / 1000
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Accepts a sequence of `<number><unit>` terms with units `m`, `s` and `ms`,
    /// each unit at most once and in that order: `30s`, `2m`, `1m30s`, `1500ms`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DurationParseError {
            input: s.to_string(),
        };
        let input = s.trim().to_ascii_lowercase();
        let mut rest = input.as_str();
        let mut total_ms: u64 = 0;
        // Index into UNITS of the next unit allowed; enforces m, s, ms ordering
        let mut next_unit = 0;
        const UNITS: [(&str, u64); 3] = [("m", 60_000), ("s", 1000), ("ms", 1)];

        if rest.is_empty() {
            return Err(err());
        }

        while !rest.is_empty() {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            if digits == 0 {
                return Err(err());
            }
            let value: u64 = rest[..digits].parse().map_err(|_| err())?;
            rest = &rest[digits..];

            let unit_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
            let unit = &rest[..unit_len];
            rest = &rest[unit_len..];

            let position = UNITS[next_unit..]
                .iter()
                .position(|(name, _)| *name == unit)
                .ok_or_else(err)?;
            let (_, factor) = UNITS[next_unit + position];
            next_unit += position + 1;

            total_ms = value
                .checked_mul(factor)
                .and_then(|ms| total_ms.checked_add(ms))
                .ok_or_else(err)?;
        }

        if total_ms == 0 {
            return Err(err());
        }

        Ok(Self::from_millis(total_ms))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.milliseconds / 60_000;
        let seconds = (self.milliseconds % 60_000) / 1000;
        let millis = self.milliseconds % 1000;

        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        if millis > 0 {
            write!(f, "{}ms", millis)?;
        }
        Ok(())
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_duration()
    }
}
