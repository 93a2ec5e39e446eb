//! Substitution and constant folding.

mod fold;
mod substitute;

pub use fold::fold_constants;
pub use substitute::substitute;
