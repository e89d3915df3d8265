//! Report Builder Module
//! Turns the current dropdown selection into zero or four chart figures.

use crate::charts::{
    BarData, BarGroupSeries, Figure, FigureKind, GroupedBarData, LineData, PieData,
};
use crate::data::queries;
use polars::prelude::*;
use rayon::prelude::*;
use std::cmp::Ordering;
use thiserror::Error;

/// Year range offered by the year dropdown.
pub const FIRST_YEAR: i32 = 1980;
pub const LAST_YEAR: i32 = 2023;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Yearly,
    Recession,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Yearly, ReportKind::Recession];

    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Yearly => "Yearly Statistics",
            ReportKind::Recession => "Recession Period Statistics",
        }
    }
}

/// Current dropdown state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub report: Option<ReportKind>,
    pub year: Option<i32>,
}

impl Selection {
    /// The year dropdown is live only in yearly mode.
    pub fn year_selector_enabled(&self) -> bool {
        self.report == Some(ReportKind::Yearly)
    }
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("report query failed: {0}")]
    Query(#[from] PolarsError),
}

/// Build the panels for the current selection: four for a recession
/// report, four for a yearly report with a chosen year, none otherwise.
pub fn build_report(df: &DataFrame, selection: Selection) -> Result<Vec<Figure>, ReportError> {
    match (selection.report, selection.year) {
        (Some(ReportKind::Recession), _) => recession_report(df),
        (Some(ReportKind::Yearly), Some(year)) => yearly_report(df, year),
        _ => Ok(Vec::new()),
    }
}

#[derive(Clone, Copy)]
enum RecessionPanel {
    SalesTrend,
    SalesByType,
    AdSpendShare,
    UnemploymentImpact,
}

fn recession_report(df: &DataFrame) -> Result<Vec<Figure>, ReportError> {
    // Every panel derives from the recession rows only
    let recession = queries::recession_rows(df)?;

    let panels = [
        RecessionPanel::SalesTrend,
        RecessionPanel::SalesByType,
        RecessionPanel::AdSpendShare,
        RecessionPanel::UnemploymentImpact,
    ];

    panels
        .par_iter()
        .map(|panel| build_recession_panel(&recession, *panel))
        .collect()
}

fn build_recession_panel(
    recession: &DataFrame,
    panel: RecessionPanel,
) -> Result<Figure, ReportError> {
    match panel {
        RecessionPanel::SalesTrend => {
            let rows = queries::mean_sales_by_year(recession)?;
            Ok(Figure {
                title: "Average Automobile Sales fluctuation over Recession Period".to_string(),
                x_label: queries::COL_YEAR.to_string(),
                y_label: queries::COL_SALES.to_string(),
                kind: FigureKind::Line(LineData {
                    points: rows.iter().map(|&(y, v)| [y as f64, v]).collect(),
                    x_ticks: None,
                }),
            })
        }
        RecessionPanel::SalesByType => {
            let rows = queries::mean_sales_by_vehicle_type(recession)?;
            Ok(Figure {
                title: "Average Number of Vehicles Sold By Vehicle Type".to_string(),
                x_label: queries::COL_VEHICLE_TYPE.to_string(),
                y_label: queries::COL_SALES.to_string(),
                kind: FigureKind::Bar(bar_from_pairs(rows)),
            })
        }
        RecessionPanel::AdSpendShare => {
            let rows = queries::total_ad_spend_by_vehicle_type(recession)?;
            Ok(Figure {
                title: "Advertising Expenditure by Vehicle Type".to_string(),
                x_label: String::new(),
                y_label: String::new(),
                kind: FigureKind::Pie(PieData::from_pairs(rows)),
            })
        }
        RecessionPanel::UnemploymentImpact => {
            let rows = queries::mean_sales_by_unemployment_and_type(recession)?;
            Ok(Figure {
                title: "Effect of Unemployment Rate on Vehicle Type and Sales".to_string(),
                x_label: queries::COL_UNEMPLOYMENT.to_string(),
                y_label: queries::COL_SALES.to_string(),
                kind: FigureKind::GroupedBar(grouped_bar_from_rows(&rows)),
            })
        }
    }
}

#[derive(Clone, Copy)]
enum YearlyPanel {
    AnnualTrend,
    MonthlyTotals,
    TypeAverages,
    AdSpendShare,
}

fn yearly_report(df: &DataFrame, year: i32) -> Result<Vec<Figure>, ReportError> {
    let year_rows = queries::rows_for_year(df, year)?;

    let panels = [
        YearlyPanel::AnnualTrend,
        YearlyPanel::MonthlyTotals,
        YearlyPanel::TypeAverages,
        YearlyPanel::AdSpendShare,
    ];

    panels
        .par_iter()
        .map(|panel| build_yearly_panel(df, &year_rows, year, *panel))
        .collect()
}

fn build_yearly_panel(
    df: &DataFrame,
    year_rows: &DataFrame,
    year: i32,
    panel: YearlyPanel,
) -> Result<Figure, ReportError> {
    match panel {
        // The two trend panels deliberately read the full dataset
        YearlyPanel::AnnualTrend => {
            let rows = queries::mean_sales_by_year(df)?;
            Ok(Figure {
                title: "Automobile Sales".to_string(),
                x_label: queries::COL_YEAR.to_string(),
                y_label: queries::COL_SALES.to_string(),
                kind: FigureKind::Line(LineData {
                    points: rows.iter().map(|&(y, v)| [y as f64, v]).collect(),
                    x_ticks: None,
                }),
            })
        }
        YearlyPanel::MonthlyTotals => {
            let rows = queries::total_sales_by_month(df)?;
            let (months, totals): (Vec<String>, Vec<f64>) = rows.into_iter().unzip();
            Ok(Figure {
                title: "Total Monthly Automobile Sales".to_string(),
                x_label: queries::COL_MONTH.to_string(),
                y_label: queries::COL_SALES.to_string(),
                kind: FigureKind::Line(LineData {
                    points: totals
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| [i as f64, v])
                        .collect(),
                    x_ticks: Some(months),
                }),
            })
        }
        YearlyPanel::TypeAverages => {
            let rows = queries::mean_sales_by_vehicle_type(year_rows)?;
            Ok(Figure {
                title: format!("Average Vehicles Sold by Vehicle Type in the year {year}"),
                x_label: queries::COL_VEHICLE_TYPE.to_string(),
                y_label: queries::COL_SALES.to_string(),
                kind: FigureKind::Bar(bar_from_pairs(rows)),
            })
        }
        YearlyPanel::AdSpendShare => {
            let rows = queries::total_ad_spend_by_vehicle_type(year_rows)?;
            Ok(Figure {
                title: "Advertising Expenditure by Vehicle Type".to_string(),
                x_label: String::new(),
                y_label: String::new(),
                kind: FigureKind::Pie(PieData::from_pairs(rows)),
            })
        }
    }
}

fn bar_from_pairs(rows: Vec<(String, f64)>) -> BarData {
    let (categories, values) = rows.into_iter().unzip();
    BarData { categories, values }
}

/// Pivot (rate, type, value) rows into one bar series per vehicle type,
/// aligned on the sorted distinct rates.
fn grouped_bar_from_rows(rows: &[(f64, String, f64)]) -> GroupedBarData {
    let mut rates: Vec<f64> = rows.iter().map(|r| r.0).collect();
    rates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    rates.dedup_by(|a, b| (*a - *b).abs() < 1e-9);

    let mut types: Vec<String> = rows.iter().map(|r| r.1.clone()).collect();
    types.sort();
    types.dedup();

    let series = types
        .iter()
        .map(|ty| BarGroupSeries {
            name: ty.clone(),
            values: rates
                .iter()
                .map(|&rate| {
                    rows.iter()
                        .find(|(r, t, _)| t == ty && (r - rate).abs() < 1e-9)
                        .map(|&(_, _, v)| v)
                })
                .collect(),
        })
        .collect();

    GroupedBarData {
        slots: rates.iter().map(|r| format!("{r}")).collect(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::queries::{
        COL_AD_SPEND, COL_MONTH, COL_RECESSION, COL_SALES, COL_UNEMPLOYMENT, COL_VEHICLE_TYPE,
        COL_YEAR,
    };

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

    fn select(report: Option<ReportKind>, year: Option<i32>) -> Selection {
        Selection { report, year }
    }

    #[test]
    fn recession_report_has_four_panels_from_recession_rows_only() {
        let figures =
            build_report(&sample_frame(), select(Some(ReportKind::Recession), None)).unwrap();
        assert_eq!(figures.len(), 4);

        // Recession rows cover 1980 (twice) and 1982: two trend points
        let FigureKind::Line(trend) = &figures[0].kind else {
            panic!("first panel should be the sales trend line");
        };
        assert_eq!(trend.points.len(), 2);
        assert_eq!(trend.points[0], [1980.0, 150.0]);
        assert_eq!(trend.points[1], [1982.0, 600.0]);

        assert!(matches!(figures[1].kind, FigureKind::Bar(_)));
        assert!(matches!(figures[2].kind, FigureKind::Pie(_)));
        assert!(matches!(figures[3].kind, FigureKind::GroupedBar(_)));
    }

    #[test]
    fn yearly_report_mixes_full_and_year_filtered_panels() {
        let figures =
            build_report(&sample_frame(), select(Some(ReportKind::Yearly), Some(1981))).unwrap();
        assert_eq!(figures.len(), 4);

        // Annual trend spans the full dataset, not just 1981
        let FigureKind::Line(trend) = &figures[0].kind else {
            panic!("first panel should be the annual trend line");
        };
        assert_eq!(trend.points.len(), 3);

        // Type breakdown is restricted to the chosen year
        let FigureKind::Bar(bars) = &figures[2].kind else {
            panic!("third panel should be the type breakdown bar");
        };
        assert_eq!(
            bars.categories,
            vec!["Executivecar".to_string(), "Supperminicar".to_string()]
        );
        assert_eq!(bars.values, vec![400.0, 300.0]);
        assert!(figures[2].title.contains("1981"));

        // Ad spend pie is restricted to the chosen year
        let FigureKind::Pie(pie) = &figures[3].kind else {
            panic!("fourth panel should be the ad spend pie");
        };
        let total: f64 = pie.slices.iter().map(|s| s.value).sum();
        assert_eq!(total, 70.0); // 30 + 40 from the 1981 rows
    }

    #[test]
    fn incomplete_selections_yield_no_panels() {
        let df = sample_frame();
        assert!(build_report(&df, select(None, None)).unwrap().is_empty());
        assert!(build_report(&df, select(None, Some(1981))).unwrap().is_empty());
        assert!(build_report(&df, select(Some(ReportKind::Yearly), None))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn year_selector_follows_report_kind() {
        assert!(select(Some(ReportKind::Yearly), None).year_selector_enabled());
        assert!(!select(Some(ReportKind::Recession), None).year_selector_enabled());
        assert!(!select(None, None).year_selector_enabled());
    }

    #[test]
    fn grouped_bar_aligns_series_on_rate_slots() {
        let rows = vec![
            (3.0, "Sports".to_string(), 500.0),
            (3.0, "Supperminicar".to_string(), 600.0),
            (5.0, "Supperminicar".to_string(), 150.0),
        ];
        let grouped = grouped_bar_from_rows(&rows);
        assert_eq!(grouped.slots, vec!["3".to_string(), "5".to_string()]);
        assert_eq!(grouped.series.len(), 2);
        let sports = &grouped.series[0];
        assert_eq!(sports.name, "Sports");
        assert_eq!(sports.values, vec![Some(500.0), None]);
        let mini = &grouped.series[1];
        assert_eq!(mini.values, vec![Some(600.0), Some(150.0)]);
    }
}
