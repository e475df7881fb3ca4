use std::fmt;

use chrono::NaiveDate;

/// Urgency band for an item, by days remaining until its expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Expired,
    /// Expires today or tomorrow.
    Urgent,
    /// Two or three days left.
    Soon,
    Fresh,
}

impl ExpiryStatus {
    pub fn from_days_left(days_left: i64) -> Self {
        match days_left {
            d if d < 0 => ExpiryStatus::Expired,
            0..=1 => ExpiryStatus::Urgent,
            2..=3 => ExpiryStatus::Soon,
            _ => ExpiryStatus::Fresh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "expired",
            ExpiryStatus::Urgent => "urgent",
            ExpiryStatus::Soon => "soon",
            ExpiryStatus::Fresh => "fresh",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the model answered, with surrounding whitespace stripped.
///
/// Usually a `YYYY-MM-DD` date, but nothing guarantees it: the text is
/// whatever the remote model produced. The date helpers return `None`
/// instead of failing when the text is not a bare date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryAnswer(String);

impl ExpiryAnswer {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }

    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        self.as_date().map(|date| (date - today).num_days())
    }

    pub fn status(&self, today: NaiveDate) -> Option<ExpiryStatus> {
        self.days_left(today).map(ExpiryStatus::from_days_left)
    }
}

impl AsRef<str> for ExpiryAnswer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpiryAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
