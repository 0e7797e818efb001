use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Parsed user input: either a structured lookup filter or a free-text
/// search term. Exactly one form per reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillReference {
    /// `TYPE NUMBER/YEAR` or bare `NUMBER/YEAR`. The type code is kept as
    /// typed (uppercased); unknown codes simply yield zero matches downstream.
    Filter {
        type_code: Option<String>,
        number: u32,
        year: u16,
    },
    /// Anything that does not look like a bill number.
    FreeText(String),
}

/// One search-result entry. Built transiently per search, never persisted.
///
/// The structured triple is present for API matches and absent for entries
/// scraped from the portal result listing, where only the display title is
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillSummary {
    pub id: u64,
    pub type_code: Option<String>,
    pub number: Option<u32>,
    pub year: Option<u16>,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub party: Option<String>,
    pub state_code: Option<String>,
}

impl AuthorInfo {
    /// `PARTIDO/UF` when both are known, otherwise `N/A`.
    #[must_use]
    pub fn party_state(&self) -> String {
        match (self.party.as_deref(), self.state_code.as_deref()) {
            (Some(party), Some(state)) if !party.is_empty() && !state.is_empty() => {
                format!("{party}/{state}")
            }
            _ => "N/A".to_string(),
        }
    }
}

/// A dated record of a bill's movement through committees.
///
/// `timestamp` is the best-effort parsed sort key; `raw_date` preserves the
/// upstream string for display, so an unparsable date still renders as the
/// source printed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduralEvent {
    pub timestamp: NaiveDateTime,
    pub raw_date: String,
    pub committee_code: Option<String>,
    pub dispatch: Option<String>,
    pub description: Option<String>,
}

impl ProceduralEvent {
    /// Display form of the event date: `02/05/2023 às 14:00` when the
    /// timestamp parsed, the upstream string untouched when it did not.
    #[must_use]
    pub fn display_date(&self) -> String {
        if self.timestamp == crate::datetime::EARLIEST {
            self.raw_date.clone()
        } else {
            self.timestamp.format("%d/%m/%Y às %H:%M").to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeInfo {
    pub code: String,
    pub full_name: String,
    pub kind: String,
}

/// Fully aggregated bill record. Immutable snapshot, one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillDetail {
    pub type_code: String,
    pub number: u32,
    pub year: u16,
    pub summary_text: String,
    pub status_description: Option<String>,
    pub current_committee_code: Option<String>,
    pub current_committee: Option<CommitteeInfo>,
    pub procedure_regime: Option<String>,
    /// First two authors at most; `more_authors` marks the "e outros" tail.
    pub authors: Vec<AuthorInfo>,
    pub more_authors: bool,
    pub latest_event: Option<ProceduralEvent>,
    /// Most-recent-first, capped at 5.
    pub recent_events: Vec<ProceduralEvent>,
    pub full_text_url: Option<String>,
    pub portal_link: String,
}
