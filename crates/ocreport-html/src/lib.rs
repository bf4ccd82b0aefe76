//! HTML report rendering for ocreport
//!
//! Renders collected namespace data into a single HTML document styled by
//! an external stylesheet.

mod render;

pub use render::{DEFAULT_STYLESHEET_URL, DEFAULT_TITLE, ReportOptions, render_report};
