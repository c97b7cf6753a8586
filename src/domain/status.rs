use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Workflow status of a P.A record.
///
/// Three values are well known and drive colouring and the deadline sweep;
/// anything else is carried verbatim as free text, exactly as the board
/// stores it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// The ticket is open and waiting to be worked.
    #[default]
    Open,
    /// The ticket is being analysed.
    Analysis,
    /// The ticket is finished. Finished records are excluded from overdue
    /// warnings.
    Done,
    /// Any other free-text status.
    Other(String),
}

impl Status {
    /// The canonical string form, as stored on the board.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "OPEN",
            Self::Analysis => "ANALYSIS",
            Self::Done => "DONE",
            Self::Other(text) => text,
        }
    }

    /// Whether the record no longer counts towards deadline warnings.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.trim().to_uppercase().as_str() {
            "OPEN" => Self::Open,
            "ANALYSIS" => Self::Analysis,
            "DONE" => Self::Done,
            _ => Self::Other(value),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(text) => text,
            known => known.as_str().to_owned(),
        }
    }
}

/// Whether a record has been marked complete.
///
/// The board stores this as `YES`, `NO` or the empty string; unrecognised
/// values load as [`Completion::Unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Completion {
    /// No answer recorded.
    #[default]
    Unset,
    /// Marked complete.
    Yes,
    /// Explicitly marked incomplete.
    No,
}

impl Completion {
    /// The canonical string form, as stored on the board.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Completion {
    fn from(value: String) -> Self {
        match value.trim().to_uppercase().as_str() {
            "YES" => Self::Yes,
            "NO" => Self::No,
            _ => Self::Unset,
        }
    }
}

impl From<Completion> for String {
    fn from(completion: Completion) -> Self {
        completion.as_str().to_owned()
    }
}

/// The error returned when a completion flag cannot be parsed strictly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown completion '{0}': expected 'yes', 'no' or nothing")]
pub struct UnknownCompletion(String);

impl FromStr for Completion {
    type Err = UnknownCompletion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" => Ok(Self::Unset),
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            _ => Err(UnknownCompletion(s.to_owned())),
        }
    }
}

/// The requirement category of a record.
///
/// Two of the categories imply a fixed due-date offset from the opening
/// date; see [`RequirementKind::offset_days`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequirementKind {
    /// No requirement category; the due date is entered by hand.
    #[default]
    None,
    /// Due three calendar days after opening.
    ThreeDays,
    /// Due seven calendar days after opening.
    SevenDays,
    /// Subject to both checkpoints; due seven calendar days after opening.
    ThreeAndSevenDays,
}

impl RequirementKind {
    /// The fixed offset, in calendar days, this category forces onto the due
    /// date. `None` when the due date is free-form.
    #[must_use]
    pub const fn offset_days(self) -> Option<u64> {
        match self {
            Self::None => None,
            Self::ThreeDays => Some(3),
            Self::SevenDays | Self::ThreeAndSevenDays => Some(7),
        }
    }

    /// The canonical string form, as stored on the board.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::ThreeDays => "3 days",
            Self::SevenDays => "7 days",
            Self::ThreeAndSevenDays => "3 and 7 days",
        }
    }
}

impl fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RequirementKind {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<RequirementKind> for String {
    fn from(kind: RequirementKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// The error returned when a requirement kind cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown requirement kind '{0}': expected 'none', '3 days', '7 days' or '3 and 7 days'")]
pub struct UnknownKind(String);

impl FromStr for RequirementKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "3" | "3 days" | "3-days" => Ok(Self::ThreeDays),
            "7" | "7 days" | "7-days" => Ok(Self::SevenDays),
            "3 and 7" | "3 and 7 days" | "3-and-7" | "3-and-7-days" => Ok(Self::ThreeAndSevenDays),
            _ => Err(UnknownKind(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Completion, RequirementKind, Status};

    #[test]
    fn status_round_trips_known_values() {
        for (text, status) in [
            ("OPEN", Status::Open),
            ("ANALYSIS", Status::Analysis),
            ("DONE", Status::Done),
        ] {
            assert_eq!(Status::from(text.to_owned()), status);
            assert_eq!(String::from(status), text);
        }
    }

    #[test]
    fn status_preserves_free_text() {
        let status = Status::from("waiting on customer".to_owned());
        assert_eq!(
            status,
            Status::Other("waiting on customer".to_owned())
        );
        assert!(!status.is_done());
        assert_eq!(String::from(status), "waiting on customer");
    }

    #[test]
    fn status_parsing_ignores_case_and_whitespace() {
        assert_eq!(Status::from(" done ".to_owned()), Status::Done);
    }

    #[test]
    fn completion_parses_strictly_from_cli_input() {
        assert_eq!("yes".parse(), Ok(Completion::Yes));
        assert_eq!("NO".parse(), Ok(Completion::No));
        assert_eq!("".parse(), Ok(Completion::Unset));
        assert!("maybe".parse::<Completion>().is_err());
    }

    #[test]
    fn requirement_offsets() {
        assert_eq!(RequirementKind::None.offset_days(), None);
        assert_eq!(RequirementKind::ThreeDays.offset_days(), Some(3));
        assert_eq!(RequirementKind::SevenDays.offset_days(), Some(7));
        assert_eq!(RequirementKind::ThreeAndSevenDays.offset_days(), Some(7));
    }

    #[test]
    fn requirement_kind_accepts_cli_shorthand() {
        assert_eq!("3".parse(), Ok(RequirementKind::ThreeDays));
        assert_eq!("3-and-7".parse(), Ok(RequirementKind::ThreeAndSevenDays));
        assert_eq!("none".parse(), Ok(RequirementKind::None));
        assert!("monthly".parse::<RequirementKind>().is_err());
    }

    #[test]
    fn unknown_stored_kind_loads_as_none() {
        // Values written by other clients must not break loading.
        assert_eq!(
            RequirementKind::from("weekly".to_owned()),
            RequirementKind::None
        );
    }
}
