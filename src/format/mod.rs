//! Text rendering of expressions, sets and analysis reports.

pub mod expr;
pub mod report;
pub mod set;

pub use expr::pretty;
pub use report::render_report;
pub use set::format_real_subset;
