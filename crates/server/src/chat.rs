use once_cell::sync::Lazy;
use regex::Regex;

use camara_core::{parse_reference, BillReference};

// Longer codes first so PLP is not shadowed by PL in the capture.
static EXPLICIT_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(PLP|PDL|PRC|PDC|PEC|MPV|REQ|INC|RIC|PL)\s*(\d{1,6})/(\d{4})\b")
        .expect("static regex")
});
static NUMERIC_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,6})/(\d{4})\b").expect("static regex"));

/// Pulls a bill reference out of a free-form question.
///
/// "Como está o PL 2306/2020?" and "PL2306/2020" both normalize to
/// "PL 2306/2020"; a bare "2306/2020" stays numeric; anything else is
/// returned as-is and becomes a free-text search.
#[must_use]
pub fn extract_reference(question: &str) -> String {
    if let Some(caps) = EXPLICIT_REF.captures(question) {
        return format!("{} {}/{}", caps[1].to_uppercase(), &caps[2], &caps[3]);
    }
    if let Some(caps) = NUMERIC_REF.captures(question) {
        return format!("{}/{}", &caps[1], &caps[2]);
    }
    question.trim().to_string()
}

/// A bare `NNNN/YYYY` question, without a type code. The chat surface
/// answers these with the candidate listing across all type codes, even
/// when only one matches, instead of jumping to the full detail.
#[must_use]
pub fn bare_number(reference: &str) -> Option<BillReference> {
    match parse_reference(reference) {
        Ok(
            reference @ BillReference::Filter {
                type_code: None, ..
            },
        ) => Some(reference),
        _ => None,
    }
}

/// Fixed fallback when nothing matched the question.
pub const NO_RESULTS_MESSAGE: &str =
    "Desculpe, não encontrei nenhuma proposição com esses critérios. Tente reformular sua pergunta.";
