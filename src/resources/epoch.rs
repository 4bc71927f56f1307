//! Epoch representations for spacecraft initial states.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Time standard the epoch value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeStandard {
    /// International Atomic Time
    Tai,
    /// Coordinated Universal Time
    Utc,
    /// Barycentric Dynamical Time
    Tdb,
    /// Terrestrial Time
    Tt,
}

impl TimeStandard {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tai => "TAI",
            Self::Utc => "UTC",
            Self::Tdb => "TDB",
            Self::Tt => "TT",
        }
    }
}

/// An epoch in either modified-Julian or Gregorian form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Epoch {
    ModJulian {
        standard: TimeStandard,
        time: f64,
    },
    Gregorian {
        standard: TimeStandard,
        /// Formatted `%d %b %Y %H:%M:%S.mmm`, validated at construction.
        formatted: String,
    },
}

impl Epoch {
    /// Modified-Julian epoch; any finite value is accepted.
    #[must_use]
    pub fn mod_julian(standard: TimeStandard, time: f64) -> Self {
        Self::ModJulian { standard, time }
    }

    /// Gregorian calendar epoch. Fails on anything that is not a real
    /// calendar date-time (e.g. Feb 30, minute 61).
    #[allow(clippy::too_many_arguments)]
    pub fn gregorian(
        standard: TimeStandard,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Result<Self, ConfigError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(ConfigError::InvalidEpoch {
            reason: format!("{year:04}-{month:02}-{day:02} is not a valid date"),
        })?;
        let datetime = date
            .and_hms_milli_opt(hour, minute, second, millisecond)
            .ok_or(ConfigError::InvalidEpoch {
                reason: format!("{hour:02}:{minute:02}:{second:02}.{millisecond:03} is not a valid time"),
            })?;
        Ok(Self::Gregorian {
            standard,
            formatted: datetime.format("%d %b %Y %H:%M:%S%.3f").to_string(),
        })
    }

    /// The two `GMAT <name>.DateFormat/.Epoch` lines for a spacecraft,
    /// trailing newline included.
    #[must_use]
    pub fn script(&self, name: &str) -> String {
        match self {
            Self::ModJulian { standard, time } => format!(
                "GMAT {name}.DateFormat = {}ModJulian;\nGMAT {name}.Epoch = {time};\n",
                standard.as_str()
            ),
            Self::Gregorian {
                standard,
                formatted,
            } => format!(
                "GMAT {name}.DateFormat = {}Gregorian;\nGMAT {name}.Epoch = '{formatted}';\n",
                standard.as_str()
            ),
        }
    }
}

impl Default for Epoch {
    /// The engine's own default epoch: TAI modified-Julian 21545.0.
    fn default() -> Self {
        Self::mod_julian(TimeStandard::Tai, 21545.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_julian_script() {
        let e = Epoch::default();
        assert_eq!(
            e.script("Sat1"),
            "GMAT Sat1.DateFormat = TAIModJulian;\nGMAT Sat1.Epoch = 21545;\n"
        );
    }

    #[test]
    fn test_gregorian_formatting() {
        let e = Epoch::gregorian(TimeStandard::Utc, 2024, 2, 29, 12, 0, 1, 250).unwrap();
        assert_eq!(
            e.script("Sat1"),
            "GMAT Sat1.DateFormat = UTCGregorian;\nGMAT Sat1.Epoch = '29 Feb 2024 12:00:01.250';\n"
        );
    }

    #[test]
    fn test_gregorian_rejects_impossible_dates() {
        assert!(Epoch::gregorian(TimeStandard::Utc, 2023, 2, 29, 0, 0, 0, 0).is_err());
        assert!(Epoch::gregorian(TimeStandard::Utc, 2023, 13, 1, 0, 0, 0, 0).is_err());
        assert!(Epoch::gregorian(TimeStandard::Utc, 2023, 1, 1, 24, 0, 0, 0).is_err());
    }
}
