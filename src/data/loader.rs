//! CSV Data Loader Module
//! Parses the sales CSV into a Polars DataFrame and checks its shape.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

use super::queries;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),
    #[error("dataset has no rows")]
    Empty,
}

/// The loaded sales dataset. Built once at startup and read for the
/// process lifetime; nothing mutates it after the load.
#[derive(Clone, Debug)]
pub struct SalesData {
    df: DataFrame,
}

impl SalesData {
    /// Parse downloaded CSV bytes.
    pub fn from_csv_bytes(bytes: Vec<u8>) -> Result<Self, LoaderError> {
        let df = CsvReadOptions::default()
            .with_infer_schema_length(Some(10_000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::from_frame(df)
    }

    /// Load a local copy of the dataset.
    pub fn from_csv_path(path: &Path) -> Result<Self, LoaderError> {
        // Lazy scan, collected immediately; the table stays in memory anyway
        let df = LazyCsvReader::new(path.to_string_lossy().as_ref())
            .with_infer_schema_length(Some(10_000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Self::from_frame(df)
    }

    fn from_frame(df: DataFrame) -> Result<Self, LoaderError> {
        let columns = df.get_column_names();
        for required in queries::REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }
        if df.height() == 0 {
            return Err(LoaderError::Empty);
        }

        Ok(Self { df })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Year,Month,Vehicle_Type,Automobile_Sales,Advertising_Expenditure,unemployment_rate,Recession";

    #[test]
    fn loads_well_formed_csv() {
        let csv = format!(
            "{HEADER}\n1980,Jan,Supperminicar,551.0,1558.0,5.2,1\n1980,Feb,Sports,246.0,1202.0,5.2,1\n"
        );
        let data = SalesData::from_csv_bytes(csv.into_bytes()).expect("load");
        assert_eq!(data.row_count(), 2);
        assert!(data
            .frame()
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == "Vehicle_Type"));
    }

    #[test]
    fn rejects_missing_column() {
        let csv = "Year,Month,Automobile_Sales\n1980,Jan,551.0\n".to_string();
        let err = SalesData::from_csv_bytes(csv.into_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(col) if col == "Vehicle_Type"));
    }

    #[test]
    fn rejects_empty_dataset() {
        let csv = format!("{HEADER}\n");
        let err = SalesData::from_csv_bytes(csv.into_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::Empty));
    }
}
