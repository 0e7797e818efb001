use camara_core::{BillDetail, BillSummary};

/// Result of a full consulta: either one aggregated record, a candidate
/// list the caller must disambiguate, or a free-text search listing.
/// Disambiguation is data, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Consulta {
    Detail(Box<BillDetail>),
    Ambiguous(Vec<BillSummary>),
    Listing(Vec<BillSummary>),
}
