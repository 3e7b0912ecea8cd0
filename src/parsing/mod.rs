//! Line-level parsing machinery.
//!
//! The pipeline runs one way: [`preprocess`] turns raw text into numbered
//! [`Line`]s, [`Scanner`] classifies them and answers block-boundary queries,
//! and the extractors in [`sections`] turn each block into document records.

mod header;
mod preprocess;
mod scanner;
pub mod sections;
pub mod tokens;

pub use preprocess::Line;
pub use scanner::{LineKind, Nesting, Scanner};
pub use sections::SectionKind;

pub(crate) use header::assign_header;
pub(crate) use preprocess::preprocess;
