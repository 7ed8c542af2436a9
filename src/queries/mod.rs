//! Query interfaces over a [`Store`](crate::store::Store).
//!
//! Each query struct borrows the store and returns typed rows.

pub mod sources;
pub mod summary;

pub use sources::SourceQuery;
pub use summary::SummaryQuery;
