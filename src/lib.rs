//! csv2xlsx - CSV-to-Excel conversion service for blob storage
//!
//! This crate provides an HTTP service that enumerates CSV objects under the
//! `csvfiles/` prefix of a blob storage container, merges each CSV into its
//! own worksheet of a single multi-sheet XLSX workbook, uploads the result
//! back to the container root, and returns the resulting object's URL.
//!
//! # Quick Start
//!
//! Run the service and POST a conversion request:
//!
//! ```rust,no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, csv2xlsx::router()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ```text
//! POST /api/ConvertCsvToExcel
//! { "excel_filename": "report",
//!   "container_name": "data",
//!   "connection_string": "AccountName=...;AccountKey=..." }
//! ```
//!
//! # Library Use
//!
//! The conversion pipeline can also be driven directly with an injected
//! storage client, which is how the test suite exercises it against an
//! in-memory backend:
//!
//! ```rust,no_run
//! use csv2xlsx::BlobStore;
//! use opendal::{services, Operator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let op = Operator::new(services::Memory::default())?.finish();
//! let store = BlobStore::with_operator(op, "http://storage.example/data");
//! let response = csv2xlsx::convert(&store, "report").await?;
//! println!("{}", response.excel_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Sheet Naming Policy
//!
//! Sheet names are derived from object base names with the extension
//! stripped. Names of 31 characters or fewer are used verbatim; longer names
//! are shortened at word boundaries to at most 30 characters (a word longer
//! than the width itself is hard-broken to fill it), and the corresponding
//! sheet gains a zero-based index column. Shortening does not deduplicate:
//! colliding shortened names are rejected by the workbook format layer.

mod api;
mod config;
mod error;
mod service;
mod source;
mod storage;
mod types;
mod workbook;

// 公開API
pub use api::{ConvertJob, ConvertResponse, ErrorResponse, RequestParameters, Secret};
pub use config::ServiceConfig;
pub use error::CsvToXlsxError;
pub use service::{convert, router};
pub use source::{fetch_tables, CSV_PREFIX};
pub use storage::BlobStore;
pub use types::{Cell, Table, TableSet};
pub use workbook::assemble;
