pub mod source;
pub mod summary;

pub use source::*;
pub use summary::*;
