//! Data module - dataset download, CSV loading and aggregation queries

mod fetch;
mod loader;
pub mod queries;

pub use fetch::{download_csv, FetchError};
pub use loader::{LoaderError, SalesData};
