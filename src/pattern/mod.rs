pub mod document;
pub mod quantifier;

pub use document::*;
pub use quantifier::*;
