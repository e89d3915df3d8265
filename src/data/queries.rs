//! Aggregation Queries Module
//! The filter and group-by operations the report panels are built from.

use polars::prelude::*;

pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_VEHICLE_TYPE: &str = "Vehicle_Type";
pub const COL_SALES: &str = "Automobile_Sales";
pub const COL_AD_SPEND: &str = "Advertising_Expenditure";
pub const COL_UNEMPLOYMENT: &str = "unemployment_rate";
pub const COL_RECESSION: &str = "Recession";

/// Columns the dataset must carry to be usable.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_YEAR,
    COL_MONTH,
    COL_VEHICLE_TYPE,
    COL_SALES,
    COL_AD_SPEND,
    COL_UNEMPLOYMENT,
    COL_RECESSION,
];

/// Calendar order for the Month axis.
pub const MONTH_ORDER: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar position of a month label, matched on its first three letters.
pub fn month_index(name: &str) -> Option<usize> {
    let prefix = name.trim().get(..3)?;
    MONTH_ORDER
        .iter()
        .position(|m| prefix.eq_ignore_ascii_case(m))
}

/// Rows observed during recession periods (Recession = 1).
pub fn recession_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(col(COL_RECESSION).eq(lit(1)))
        .collect()
}

/// Rows for a single year.
pub fn rows_for_year(df: &DataFrame, year: i32) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(col(COL_YEAR).eq(lit(year)))
        .collect()
}

/// Mean Automobile_Sales per Year, ascending by year.
pub fn mean_sales_by_year(df: &DataFrame) -> PolarsResult<Vec<(i32, f64)>> {
    let out = df
        .clone()
        .lazy()
        .group_by([col(COL_YEAR)])
        .agg([col(COL_SALES).mean()])
        .sort([COL_YEAR], Default::default())
        .collect()?;

    let years = int_column(&out, COL_YEAR)?;
    let sales = float_column(&out, COL_SALES)?;
    Ok(years.into_iter().zip(sales).collect())
}

/// Mean Automobile_Sales per Vehicle_Type, ascending by type name.
pub fn mean_sales_by_vehicle_type(df: &DataFrame) -> PolarsResult<Vec<(String, f64)>> {
    let out = df
        .clone()
        .lazy()
        .group_by([col(COL_VEHICLE_TYPE)])
        .agg([col(COL_SALES).mean()])
        .sort([COL_VEHICLE_TYPE], Default::default())
        .collect()?;

    let types = string_column(&out, COL_VEHICLE_TYPE)?;
    let sales = float_column(&out, COL_SALES)?;
    Ok(types.into_iter().zip(sales).collect())
}

/// Total Advertising_Expenditure per Vehicle_Type, ascending by type name.
pub fn total_ad_spend_by_vehicle_type(df: &DataFrame) -> PolarsResult<Vec<(String, f64)>> {
    let out = df
        .clone()
        .lazy()
        .group_by([col(COL_VEHICLE_TYPE)])
        .agg([col(COL_AD_SPEND).sum()])
        .sort([COL_VEHICLE_TYPE], Default::default())
        .collect()?;

    let types = string_column(&out, COL_VEHICLE_TYPE)?;
    let spend = float_column(&out, COL_AD_SPEND)?;
    Ok(types.into_iter().zip(spend).collect())
}

/// Total Automobile_Sales per Month in calendar order. Labels that are not
/// month names sort after December in input order.
pub fn total_sales_by_month(df: &DataFrame) -> PolarsResult<Vec<(String, f64)>> {
    let out = df
        .clone()
        .lazy()
        .group_by([col(COL_MONTH)])
        .agg([col(COL_SALES).sum()])
        .collect()?;

    let months = string_column(&out, COL_MONTH)?;
    let sales = float_column(&out, COL_SALES)?;

    let mut rows: Vec<(String, f64)> = months.into_iter().zip(sales).collect();
    rows.sort_by_key(|(month, _)| month_index(month).unwrap_or(usize::MAX));
    Ok(rows)
}

/// Mean Automobile_Sales per (unemployment_rate, Vehicle_Type) pair.
pub fn mean_sales_by_unemployment_and_type(
    df: &DataFrame,
) -> PolarsResult<Vec<(f64, String, f64)>> {
    let out = df
        .clone()
        .lazy()
        .group_by([col(COL_UNEMPLOYMENT), col(COL_VEHICLE_TYPE)])
        .agg([col(COL_SALES).mean()])
        .sort([COL_UNEMPLOYMENT, COL_VEHICLE_TYPE], Default::default())
        .collect()?;

    let rates = float_column(&out, COL_UNEMPLOYMENT)?;
    let types = string_column(&out, COL_VEHICLE_TYPE)?;
    let sales = float_column(&out, COL_SALES)?;

    Ok(rates
        .into_iter()
        .zip(types)
        .zip(sales)
        .map(|((rate, ty), value)| (rate, ty, value))
        .collect())
}

fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let cast = df.column(name)?.cast(&DataType::Float64)?;
    let values = cast.f64()?;
    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn int_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<i32>> {
    let cast = df.column(name)?.cast(&DataType::Int32)?;
    let values = cast.i32()?;
    Ok(values.into_iter().map(|v| v.unwrap_or(0)).collect())
}

fn string_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<String>> {
    let series = df.column(name)?.as_materialized_series();
    Ok((0..series.len())
        .map(|i| match series.get(i) {
            Ok(v) if !v.is_null() => v.to_string().trim_matches('"').to_string(),
            _ => String::new(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            COL_YEAR => [1980i64, 1980, 1981, 1981, 1982, 1982],
            COL_MONTH => ["Jan", "Feb", "Jan", "Mar", "Dec", "Jan"],
            COL_VEHICLE_TYPE => [
                "Supperminicar",
                "Sports",
                "Supperminicar",
                "Executivecar",
                "Sports",
                "Supperminicar",
            ],
            COL_SALES => [100.0, 200.0, 300.0, 400.0, 500.0, 600.0],
            COL_AD_SPEND => [10.0, 20.0, 30.0, 40.0, 50.0, 60.0],
            COL_UNEMPLOYMENT => [5.0, 5.0, 4.0, 4.0, 3.0, 3.0],
            COL_RECESSION => [1i64, 1, 0, 0, 0, 1],
        )
        .expect("sample frame")
    }

    #[test]
    fn month_index_matches_calendar() {
        assert_eq!(month_index("Jan"), Some(0));
        assert_eq!(month_index("december"), Some(11));
        assert_eq!(month_index("August"), Some(7));
        assert_eq!(month_index("??"), None);
    }

    #[test]
    fn recession_rows_keep_only_flagged_periods() {
        let rec = recession_rows(&sample_frame()).unwrap();
        assert_eq!(rec.height(), 3);
        let flags = float_column(&rec, COL_RECESSION).unwrap();
        assert!(flags.iter().all(|&f| f == 1.0));
    }

    #[test]
    fn mean_sales_by_year_averages_and_sorts() {
        let rows = mean_sales_by_year(&sample_frame()).unwrap();
        assert_eq!(
            rows,
            vec![(1980, 150.0), (1981, 350.0), (1982, 550.0)]
        );
    }

    #[test]
    fn monthly_totals_follow_calendar_order() {
        let rows = total_sales_by_month(&sample_frame()).unwrap();
        let months: Vec<&str> = rows.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(months, vec!["Jan", "Feb", "Mar", "Dec"]);
        assert_eq!(rows[0].1, 1000.0); // Jan: 100 + 300 + 600
        assert_eq!(rows[3].1, 500.0);
    }

    #[test]
    fn ad_spend_totals_per_type() {
        let rows = total_ad_spend_by_vehicle_type(&sample_frame()).unwrap();
        assert_eq!(
            rows,
            vec![
                ("Executivecar".to_string(), 40.0),
                ("Sports".to_string(), 70.0),
                ("Supperminicar".to_string(), 100.0),
            ]
        );
    }

    #[test]
    fn unemployment_breakdown_pairs_rate_with_type() {
        let rows = mean_sales_by_unemployment_and_type(&sample_frame()).unwrap();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], (3.0, "Sports".to_string(), 500.0));
        assert_eq!(rows[1], (3.0, "Supperminicar".to_string(), 600.0));
        assert_eq!(rows[5], (5.0, "Supperminicar".to_string(), 100.0));
    }
}
