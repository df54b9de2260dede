//! Report template context assembly.
//!
//! Builds the variable map consumed by the (external) document templating
//! layer: flattened form fields, the insulation compliance table, Spanish
//! date parts, everything uppercased the way the printed reports expect.

pub mod context;
pub mod dates;
pub mod upper;

pub use context::{build_context, CoordinateMode, GeneralInfo, NameplateData, ReportFields};
pub use dates::{date_parts, DateParts, SPANISH_MONTHS};
pub use upper::deep_uppercase;
