mod datetime;
mod error;
mod reference;
mod render;
mod types;

pub use datetime::{parse_api_timestamp, parse_portal_date, EARLIEST};
pub use error::{ReferenceError, Result};
pub use reference::parse_reference;
pub use render::{
    authors_line, render_detail, render_disambiguation, render_search_results, RenderFormat,
};
pub use types::{
    AuthorInfo, BillDetail, BillReference, BillSummary, CommitteeInfo, ProceduralEvent,
};
