//! Inquiry ("quote") status set, intake form validation, and list filtering.
//!
//! Statuses form an unordered set. The studio's intended flow is
//! `new -> in_conversation -> closed`, with `lost` reachable from anywhere,
//! but administrators may move a quote between any two statuses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Follow-up status of a visitor inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    New,
    InConversation,
    Closed,
    Lost,
}

impl QuoteStatus {
    /// Every status, in the order the back-office lists them.
    pub const ALL: [QuoteStatus; 4] = [
        QuoteStatus::New,
        QuoteStatus::InConversation,
        QuoteStatus::Closed,
        QuoteStatus::Lost,
    ];

    /// Status assigned to every quote created through the intake form.
    pub const INITIAL: QuoteStatus = QuoteStatus::New;

    /// Database / wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InConversation => "in_conversation",
            Self::Closed => "closed",
            Self::Lost => "lost",
        }
    }

    /// Display label shown in the back-office.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "Novo",
            Self::InConversation => "Em conversa",
            Self::Closed => "Fechado",
            Self::Lost => "Perdido",
        }
    }

    /// Statuses the intended flow suggests from `self`.
    ///
    /// Presentation only: [`QuoteStatus::can_transition_to`] accepts any move.
    pub fn intended_next(self) -> &'static [QuoteStatus] {
        match self {
            Self::New => &[Self::InConversation, Self::Lost],
            Self::InConversation => &[Self::Closed, Self::Lost],
            Self::Closed => &[Self::Lost],
            Self::Lost => &[],
        }
    }

    /// Any status may be selected from any other status.
    pub fn can_transition_to(self, _next: QuoteStatus) -> bool {
        true
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "in_conversation" => Ok(Self::InConversation),
            "closed" => Ok(Self::Closed),
            "lost" => Ok(Self::Lost),
            other => Err(CoreError::Validation(format!(
                "Unknown quote status '{other}'. Must be one of: new, in_conversation, closed, lost"
            ))),
        }
    }
}

impl TryFrom<String> for QuoteStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Intake form
// ---------------------------------------------------------------------------

/// Contact form as submitted by a visitor.
///
/// Length limits mirror the public contact form inputs. Missing fields
/// deserialize as empty so they are reported by [`QuoteForm::validate_submission`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct QuoteForm {
    #[validate(length(max = 100))]
    pub name: String,
    #[validate(length(max = 20))]
    pub phone: String,
    #[validate(length(max = 20))]
    pub date: String,
    #[validate(length(max = 100))]
    pub city: String,
    #[validate(length(max = 1000))]
    pub message: Option<String>,
}

/// A validated, trimmed intake form ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuote {
    pub name: String,
    pub phone: String,
    pub wedding_date: String,
    pub city: String,
    pub message: Option<String>,
}

impl QuoteForm {
    /// Trim every field and check the required ones are present.
    ///
    /// Name, phone, date and city are required; a blank message becomes `None`.
    pub fn validate_submission(&self) -> Result<ValidQuote, CoreError> {
        let trimmed = QuoteForm {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            date: self.date.trim().to_string(),
            city: self.city.trim().to_string(),
            message: self
                .message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        };

        if trimmed.name.is_empty()
            || trimmed.phone.is_empty()
            || trimmed.date.is_empty()
            || trimmed.city.is_empty()
        {
            return Err(CoreError::Validation(
                "Name, phone, wedding date and city are required".into(),
            ));
        }

        trimmed
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        Ok(ValidQuote {
            name: trimmed.name,
            phone: trimmed.phone,
            wedding_date: trimmed.date,
            city: trimmed.city,
            message: trimmed.message,
        })
    }
}

// ---------------------------------------------------------------------------
// List filter
// ---------------------------------------------------------------------------

/// The searchable fields of a stored quote.
#[derive(Debug, Clone, Copy)]
pub struct QuoteFields<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub wedding_date: Option<&'a str>,
    pub city: Option<&'a str>,
    pub status: QuoteStatus,
}

/// Back-office quote list filter: free-text search AND status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFilter {
    /// Matched case-insensitively against name and city, and as a plain
    /// substring against phone and wedding date. Blank means "match all".
    pub search: Option<String>,
    /// `None` means all statuses.
    pub status: Option<QuoteStatus>,
}

impl QuoteFilter {
    /// Build a filter from raw query parameters.
    ///
    /// `status` accepts `"all"` (or nothing) for every status.
    pub fn from_params(search: Option<&str>, status: Option<&str>) -> Result<Self, CoreError> {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let status = match status.map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(s) => Some(s.parse()?),
        };
        Ok(Self { search, status })
    }

    /// The trimmed search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn matches(&self, quote: &QuoteFields<'_>) -> bool {
        let status_ok = self.status.map_or(true, |s| s == quote.status);
        status_ok && self.matches_search(quote)
    }

    fn matches_search(&self, quote: &QuoteFields<'_>) -> bool {
        let Some(term) = self.search_term() else {
            return true;
        };
        let needle = term.to_lowercase();

        quote.name.to_lowercase().contains(&needle)
            || quote
                .city
                .is_some_and(|c| c.to_lowercase().contains(&needle))
            || quote.phone.contains(term)
            || quote.wedding_date.is_some_and(|d| d.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form() -> QuoteForm {
        QuoteForm {
            name: "  Ana Souza ".into(),
            phone: " (47) 99999-0000 ".into(),
            date: "12/10/2025".into(),
            city: "Joinville".into(),
            message: Some("   ".into()),
        }
    }

    fn fields<'a>(name: &'a str, city: &'a str, status: QuoteStatus) -> QuoteFields<'a> {
        QuoteFields {
            name,
            phone: "47999990000",
            wedding_date: Some("12/10/2025"),
            city: Some(city),
            status,
        }
    }

    #[test]
    fn status_round_trips_through_names() {
        for status in QuoteStatus::ALL {
            assert_eq!(status.as_str().parse::<QuoteStatus>().unwrap(), status);
        }
        assert_matches!("pending".parse::<QuoteStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_serde_uses_snake_case() {
        let json = serde_json::to_string(&QuoteStatus::InConversation).unwrap();
        assert_eq!(json, "\"in_conversation\"");
    }

    #[test]
    fn any_status_may_follow_any_other() {
        for from in QuoteStatus::ALL {
            for to in QuoteStatus::ALL {
                assert!(from.can_transition_to(to));
            }
        }
        assert!(QuoteStatus::Lost.intended_next().is_empty());
        assert!(QuoteStatus::New
            .intended_next()
            .contains(&QuoteStatus::InConversation));
    }

    #[test]
    fn submission_is_trimmed() {
        let valid = form().validate_submission().unwrap();
        assert_eq!(valid.name, "Ana Souza");
        assert_eq!(valid.phone, "(47) 99999-0000");
        assert_eq!(valid.wedding_date, "12/10/2025");
        assert_eq!(valid.message, None);
    }

    #[test]
    fn submission_requires_core_fields() {
        for blank in ["name", "phone", "date", "city"] {
            let mut f = form();
            match blank {
                "name" => f.name = "  ".into(),
                "phone" => f.phone = String::new(),
                "date" => f.date = " ".into(),
                _ => f.city = String::new(),
            }
            assert_matches!(f.validate_submission(), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn submission_enforces_length_limits() {
        let mut f = form();
        f.name = "a".repeat(101);
        assert_matches!(f.validate_submission(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn filter_from_params() {
        let f = QuoteFilter::from_params(Some("  "), Some("all")).unwrap();
        assert_eq!(f, QuoteFilter::default());

        let f = QuoteFilter::from_params(Some("ana"), Some("closed")).unwrap();
        assert_eq!(f.search_term(), Some("ana"));
        assert_eq!(f.status, Some(QuoteStatus::Closed));

        assert!(QuoteFilter::from_params(None, Some("archived")).is_err());
    }

    #[test]
    fn search_is_case_insensitive_on_name_and_city() {
        let q = fields("Ana Souza", "Balneário Camboriú", QuoteStatus::New);
        let by_name = QuoteFilter::from_params(Some("ANA"), None).unwrap();
        let by_city = QuoteFilter::from_params(Some("camboriú"), None).unwrap();
        let by_phone = QuoteFilter::from_params(Some("9999"), None).unwrap();
        let by_date = QuoteFilter::from_params(Some("10/2025"), None).unwrap();
        assert!(by_name.matches(&q));
        assert!(by_city.matches(&q));
        assert!(by_phone.matches(&q));
        assert!(by_date.matches(&q));
    }

    #[test]
    fn filter_requires_both_predicates() {
        let q = fields("Ana Souza", "Joinville", QuoteStatus::New);
        let wrong_status = QuoteFilter::from_params(Some("ana"), Some("lost")).unwrap();
        let wrong_text = QuoteFilter::from_params(Some("pedro"), Some("new")).unwrap();
        let both = QuoteFilter::from_params(Some("joinville"), Some("new")).unwrap();
        assert!(!wrong_status.matches(&q));
        assert!(!wrong_text.matches(&q));
        assert!(both.matches(&q));
    }
}
