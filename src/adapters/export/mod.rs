//! Export adapters: CSV for list pages, Markdown for the yearly report, and the directory sink.

pub mod csv_export;
pub mod fs_sink;
pub mod markdown;

pub use csv_export::{expenses_to_csv, invoices_to_csv, payments_to_csv};
pub use fs_sink::FsExportSink;
pub use markdown::report_to_markdown;
