//! Move collections in and out as CSV.
//!
//! Import validates every row against the vocabularies, enriches valid rows
//! from the metadata catalog, and reports skipped rows instead of aborting.
//! Export writes the spreadsheet-friendly format users download.

pub mod csv_export;
pub mod csv_import;
pub mod progress;

pub use csv_export::{EXPORT_HEADER, ExportError, export_csv, write_export};
pub use csv_import::{
    ColumnMap, ImportError, ImportReport, RowError, RowProblem, import_csv, parse_rating,
    parse_row,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
