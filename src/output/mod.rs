//! Report rendering for the console and JSON

pub mod formatter;
pub mod report;

pub use formatter::{save_report_to_file, ReportGenerator};
pub use report::Report;
