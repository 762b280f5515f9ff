//! Output module
//!
//! Per-category CSV export files and the console rendering of categories
//! and posts.

mod render;
mod writer;

pub use render::{render_category_header, render_category_line, render_post_details};
pub use writer::{
    csv_escape, export_filename, sanitize_category_name, write_csv, CsvExporter, TIMESTAMP_FORMAT,
};
