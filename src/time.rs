//! Time handed to demos.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// Elapsed time, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Time(f64);

impl Time {
  pub fn from_secs(secs: f64) -> Self {
    Time(secs)
  }

  /// Convert into seconds.
  pub fn as_secs(self) -> f64 {
    self.0
  }

  /// Wrap time with a given duration. A null duration leaves the time untouched.
  pub fn wrap_around(self, t: Time) -> Self {
    if t.0 > 0. {
      Time(self.0 % t.0)
    } else {
      self
    }
  }

  /// Shift time forward.
  pub fn offset(self, t: Time) -> Self {
    Time(self.0 + t.0)
  }
}

impl fmt::Display for Time {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    self.0.fmt(f)
  }
}

impl From<DurationSpec> for Time {
  fn from(spec: DurationSpec) -> Self {
    Time(spec.mins as f64 * 60. + spec.secs as f64)
  }
}

/// A way to specify a duration with minutes and seconds.
///
/// The string format is the following:
///
///   - `MmSs`, if you want minutes (e.g. `3m43s`).
///   - `Ss`, if you only have seconds (e.g. `23s`).
///   - `Mm`, if you only have minutes (e.g. `2m`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationSpec {
  mins: u8,
  secs: u8,
}

impl DurationSpec {
  pub fn new(mins: u8, secs: u8) -> Self {
    DurationSpec { mins, secs }
  }
}

impl FromStr for DurationSpec {
  type Err = DurationSpecError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if !s.ends_with('s') {
      if s.ends_with('m') {
        // only minutes
        let mins = s.trim_end_matches('m').parse().map_err(|_| DurationSpecError::CannotParseMinutes)?;

        Ok(DurationSpec { mins, secs: 0 })
      } else {
        Err(DurationSpecError::MissingSecondsSuffix)
      }
    } else if s.contains('m') {
      let mut iter = s.split('m');
      let mins = iter.next().and_then(|x| x.parse().ok()).ok_or(DurationSpecError::CannotParseMinutes)?;
      let secs = iter
        .next()
        .and_then(|x| x.trim_end_matches('s').parse().ok())
        .ok_or(DurationSpecError::CannotParseSeconds)?;

      if secs > 59 {
        return Err(DurationSpecError::TooManySeconds);
      }

      Ok(DurationSpec { mins, secs })
    } else {
      // only seconds
      let secs = s.trim_end_matches('s').parse().map_err(|_| DurationSpecError::CannotParseSeconds)?;

      Ok(DurationSpec { mins: 0, secs })
    }
  }
}

/// Possible error than can occurr while parsing a `DurationSpec` from a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationSpecError {
  MissingSecondsSuffix,
  CannotParseMinutes,
  CannotParseSeconds,
  TooManySeconds,
}

impl fmt::Display for DurationSpecError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      DurationSpecError::MissingSecondsSuffix => f.write_str("missing the seconds suffix"),
      DurationSpecError::CannotParseMinutes => f.write_str("cannot parse minutes"),
      DurationSpecError::CannotParseSeconds => f.write_str("cannot parse seconds"),
      DurationSpecError::TooManySeconds => f.write_str("seconds must not exceed 59 when minutes are given"),
    }
  }
}

impl Error for DurationSpecError {}
