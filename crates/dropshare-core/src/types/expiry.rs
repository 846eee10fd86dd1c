//! Link lifetime choices offered on the upload form.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How long an issued link stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ExpiryChoice {
    /// 1 day.
    OneDay,
    /// 3 days.
    #[default]
    ThreeDays,
    /// 7 days.
    SevenDays,
}

impl ExpiryChoice {
    /// Every choice, in the order the form lists them.
    pub const ALL: [ExpiryChoice; 3] = [Self::OneDay, Self::ThreeDays, Self::SevenDays];

    /// Number of days this choice stands for.
    pub fn days(self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::ThreeDays => 3,
            Self::SevenDays => 7,
        }
    }

    /// Absolute expiry for a link created at `now`.
    pub fn expires_at(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(i64::from(self.days()))
    }

    /// Form label, e.g. `"1 Day"` or `"7 Days"`.
    pub fn label(self) -> String {
        let days = self.days();
        format!("{days} Day{}", if days == 1 { "" } else { "s" })
    }
}

impl TryFrom<u32> for ExpiryChoice {
    type Error = AppError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            1 => Ok(Self::OneDay),
            3 => Ok(Self::ThreeDays),
            7 => Ok(Self::SevenDays),
            other => Err(AppError::validation(format!(
                "Unsupported expiry of {other} days; choose 1, 3 or 7"
            ))),
        }
    }
}

impl From<ExpiryChoice> for u32 {
    fn from(choice: ExpiryChoice) -> u32 {
        choice.days()
    }
}

impl fmt::Display for ExpiryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enumerated_days_are_accepted() {
        for days in [1, 3, 7] {
            assert_eq!(ExpiryChoice::try_from(days).unwrap().days(), days);
        }
        for days in [0, 2, 5, 30] {
            assert!(ExpiryChoice::try_from(days).is_err());
        }
    }

    #[test]
    fn test_expires_at_adds_whole_days() {
        let now = Utc::now();
        assert_eq!(
            ExpiryChoice::SevenDays.expires_at(now) - now,
            Duration::days(7)
        );
    }

    #[test]
    fn test_labels_pluralise() {
        assert_eq!(ExpiryChoice::OneDay.label(), "1 Day");
        assert_eq!(ExpiryChoice::ThreeDays.label(), "3 Days");
    }

    #[test]
    fn test_serde_uses_day_counts() {
        let json = serde_json::to_string(&ExpiryChoice::SevenDays).unwrap();
        assert_eq!(json, "7");
        assert!(serde_json::from_str::<ExpiryChoice>("4").is_err());
    }
}
