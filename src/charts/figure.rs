//! Chart Figure Model
//! Plain-data panel descriptors handed from the report builder to the
//! interactive plotter and the static renderer.

/// One chart panel: a title, axis labels and the data to draw.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: FigureKind,
}

#[derive(Debug, Clone)]
pub enum FigureKind {
    Line(LineData),
    Bar(BarData),
    GroupedBar(GroupedBarData),
    Pie(PieData),
}

/// A single line series. `x_ticks` maps integer x positions to category
/// labels (months); without it the x values are plotted as-is (years).
#[derive(Debug, Clone)]
pub struct LineData {
    pub points: Vec<[f64; 2]>,
    pub x_ticks: Option<Vec<String>>,
}

/// One bar per category.
#[derive(Debug, Clone)]
pub struct BarData {
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

/// Clustered bars: one slot per x label, one colored series per group.
/// Series values are aligned with `slots`; `None` means no observation.
#[derive(Debug, Clone)]
pub struct GroupedBarData {
    pub slots: Vec<String>,
    pub series: Vec<BarGroupSeries>,
}

#[derive(Debug, Clone)]
pub struct BarGroupSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct PieData {
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

impl PieData {
    pub fn from_pairs(pairs: Vec<(String, f64)>) -> Self {
        Self {
            slices: pairs
                .into_iter()
                .map(|(label, value)| PieSlice { label, value })
                .collect(),
        }
    }

    /// Fraction of the total per slice, aligned with `slices`. Negative and
    /// NaN values count as zero; an all-zero pie yields all-zero shares.
    pub fn shares(&self) -> Vec<f64> {
        let clamped: Vec<f64> = self
            .slices
            .iter()
            .map(|s| if s.value.is_finite() && s.value > 0.0 { s.value } else { 0.0 })
            .collect();

        let total: f64 = clamped.iter().sum();
        if total <= 0.0 {
            return vec![0.0; clamped.len()];
        }
        clamped.into_iter().map(|v| v / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_fractions_of_total() {
        let pie = PieData::from_pairs(vec![
            ("Sports".to_string(), 30.0),
            ("Executivecar".to_string(), 70.0),
        ]);
        let shares = pie.shares();
        assert_eq!(shares, vec![0.3, 0.7]);
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_pies_do_not_divide_by_zero() {
        let pie = PieData::from_pairs(vec![
            ("a".to_string(), 0.0),
            ("b".to_string(), -5.0),
            ("c".to_string(), f64::NAN),
        ]);
        assert_eq!(pie.shares(), vec![0.0, 0.0, 0.0]);
    }
}
