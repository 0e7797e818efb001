use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ReferenceError, Result};
use crate::types::BillReference;

static EXPLICIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)([a-z]{2,4})\s+(\d{1,6})/(\d{4})$").expect("static regex"));
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,6})/(\d{4})$").expect("static regex"));

/// Interprets a free-form bill reference.
///
/// Priority order: `TYPE NUMBER/YEAR` (case-insensitive type), bare
/// `NUMBER/YEAR`, otherwise the trimmed input is a free-text search term.
/// The type code is not validated here; unknown codes pass through and yield
/// zero matches downstream. Only an all-whitespace input is rejected.
pub fn parse_reference(input: &str) -> Result<BillReference> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ReferenceError::Empty);
    }

    if let Some(caps) = EXPLICIT.captures(trimmed) {
        if let (Ok(number), Ok(year)) = (caps[2].parse(), caps[3].parse()) {
            return Ok(BillReference::Filter {
                type_code: Some(caps[1].to_uppercase()),
                number,
                year,
            });
        }
    }

    if let Some(caps) = NUMERIC.captures(trimmed) {
        if let (Ok(number), Ok(year)) = (caps[1].parse(), caps[2].parse()) {
            return Ok(BillReference::Filter {
                type_code: None,
                number,
                year,
            });
        }
    }

    Ok(BillReference::FreeText(trimmed.to_string()))
}
