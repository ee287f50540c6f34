use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use chrono::{
    DateTime, Local, TimeZone,
    format::{Item, StrftimeItems},
};

use crate::{
    descriptor::TokenDescriptor,
    error::{BuildError, EvalError},
    interpreter::evaluator::core::EvalResult,
};

/// How a [`TimeToken`] formats the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    /// `%Y-%m-%d`
    Date,
    /// `%H:%M:%S`
    Time,
    /// `%Y-%m-%d_%H:%M:%S`
    DateTime,
    /// `%Y-%m-%dT%H:%M:%S`
    Iso,
    /// A caller-supplied strftime format.
    Custom,
}

impl TimeMode {
    /// The mode's name as written in descriptors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Iso => "iso",
            Self::Custom => "custom",
        }
    }

    /// The fixed format of a named mode, `None` for [`TimeMode::Custom`].
    #[must_use]
    pub const fn format(self) -> Option<&'static str> {
        match self {
            Self::Date => Some("%Y-%m-%d"),
            Self::Time => Some("%H:%M:%S"),
            Self::DateTime => Some("%Y-%m-%d_%H:%M:%S"),
            Self::Iso => Some("%Y-%m-%dT%H:%M:%S"),
            Self::Custom => None,
        }
    }
}

impl FromStr for TimeMode {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "datetime" => Ok(Self::DateTime),
            "iso" => Ok(Self::Iso),
            "custom" => Ok(Self::Custom),
            other => Err(BuildError::UnknownTimeMode { mode: other.to_string() }),
        }
    }
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token that renders the current local time.
///
/// The clock is read on every render; nothing is cached. Timestamps never
/// advance.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use startrace::token::time::{TimeMode, TimeToken};
///
/// let instant = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
///
/// let iso = TimeToken::new(TimeMode::Iso, None).unwrap();
/// assert_eq!(iso.render_at(&instant).unwrap(), "2024-03-09T14:05:00");
///
/// let custom = TimeToken::new(TimeMode::Custom, Some("%d/%m")).unwrap();
/// assert_eq!(custom.render_at(&instant).unwrap(), "09/03");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeToken {
    mode: TimeMode,
    fmt:  String,
}

impl TimeToken {
    /// Creates a timestamp token.
    ///
    /// `fmt` is only read in [`TimeMode::Custom`]; the named modes use their
    /// fixed formats.
    ///
    /// # Errors
    /// - `BuildError::MissingTimeFormat` for a custom mode without a
    ///   non-empty format.
    /// - `BuildError::InvalidTimeFormat` if the format is rejected by a trial
    ///   format of the current time.
    pub fn new(mode: TimeMode, fmt: Option<&str>) -> Result<Self, BuildError> {
        let fmt = match (mode.format(), fmt) {
            (Some(fixed), _) => fixed.to_string(),
            (None, Some(custom)) if !custom.is_empty() => custom.to_string(),
            (None, _) => return Err(BuildError::MissingTimeFormat),
        };

        let token = Self { mode, fmt };
        if StrftimeItems::new(&token.fmt).any(|item| matches!(item, Item::Error))
           || token.render().is_err()
        {
            return Err(BuildError::InvalidTimeFormat { fmt: token.fmt });
        }
        Ok(token)
    }

    /// Creates a timestamp token from a mode name.
    ///
    /// # Errors
    /// `BuildError::UnknownTimeMode` for an unrecognized name, then anything
    /// [`TimeToken::new`] returns.
    pub fn from_name(mode: &str, fmt: Option<&str>) -> Result<Self, BuildError> {
        Self::new(mode.parse()?, fmt)
    }

    #[must_use]
    pub const fn mode(&self) -> TimeMode {
        self.mode
    }

    /// The strftime format in use.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.fmt
    }

    /// Formats the current local time.
    ///
    /// # Errors
    /// `EvalError::TimeFormat` if formatting fails.
    pub fn render(&self) -> EvalResult<String> {
        self.render_at(&Local::now())
    }

    /// Formats the given instant in its own time zone.
    ///
    /// # Errors
    /// `EvalError::TimeFormat` if formatting fails.
    pub fn render_at<Tz>(&self, instant: &DateTime<Tz>) -> EvalResult<String>
        where Tz: TimeZone,
              Tz::Offset: fmt::Display
    {
        let mut out = String::new();
        write!(out, "{}", instant.format(&self.fmt)).map_err(|_| EvalError::TimeFormat { fmt: self.fmt.clone() })?;
        Ok(out)
    }

    pub(crate) fn describe(&self) -> String {
        match self.mode {
            TimeMode::Custom => format!("TimeToken({}, {})", self.mode, self.fmt),
            _ => format!("TimeToken(\"{}\")", self.mode),
        }
    }

    pub(crate) fn to_descriptor(&self) -> TokenDescriptor {
        TokenDescriptor::Time { mode: self.mode.as_str().to_string(),
                                fmt:  (self.mode == TimeMode::Custom).then(|| self.fmt.clone()), }
    }
}
