//! Search/filter query compilation.
//!
//! Pure: no storage access. The repository lowers a [`CompiledQuery`]
//! to SQL and runs the paged fetch and count from the same predicate.

mod compiler;
mod predicate;

pub use compiler::{compile, CompiledQuery, JobFilter};
pub use predicate::{Field, Ordering, Predicate, Scalar, SortDirection, SortKey};
