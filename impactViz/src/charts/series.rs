use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::analysis::formatting::format_thousands;
use crate::config::constants::*;
use crate::models::metrics::DerivedMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    AvoidedEmissions,  // Landfill + substitution, tCO2e/año
    ValorizedWaste,    // ton/año
    EstimatedRevenue,  // USD/año
}

impl ChartKind {
    /// Left-to-right order in the combined figure
    pub const ALL: [ChartKind; 3] = [
        ChartKind::AvoidedEmissions,
        ChartKind::ValorizedWaste,
        ChartKind::EstimatedRevenue,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::AvoidedEmissions => "GEI Evitados Total",
            ChartKind::ValorizedWaste => "Residuos Orgánicos Valorizados",
            ChartKind::EstimatedRevenue => "Ingresos Estimados",
        }
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            ChartKind::AvoidedEmissions => "tCO₂e/año",
            ChartKind::ValorizedWaste => "Toneladas/año",
            ChartKind::EstimatedRevenue => "USD/año",
        }
    }

    pub fn y_label_color(&self) -> &'static str {
        match self {
            ChartKind::ValorizedWaste => COLOR_PRIMARY_DARK,
            _ => COLOR_SUSTREND_DARK,
        }
    }

    /// Baseline bar color, projection bar color
    pub fn bar_colors(&self) -> [&'static str; 2] {
        match self {
            ChartKind::AvoidedEmissions => [COLOR_PRIMARY_DARK, COLOR_PRIMARY_GREEN],
            ChartKind::ValorizedWaste => [COLOR_SUSTREND_LIGHT, COLOR_SUSTREND_DARK],
            ChartKind::EstimatedRevenue => [COLOR_PRIMARY_GREEN, COLOR_PRIMARY_DARK],
        }
    }

    /// Download file name without extension
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ChartKind::AvoidedEmissions => "GEI_Evitados_Total",
            ChartKind::ValorizedWaste => "Residuos_Valorizados",
            ChartKind::EstimatedRevenue => "Ingresos_Estimados",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.file_prefix())
    }

    pub fn axis_floor(&self) -> f64 {
        match self {
            ChartKind::EstimatedRevenue => REVENUE_AXIS_FLOOR,
            _ => TONNAGE_AXIS_FLOOR,
        }
    }

    /// Text drawn above a bar
    pub fn annotate(&self, value: f64) -> String {
        match self {
            ChartKind::EstimatedRevenue => format!("${}", format_thousands(value, 0)),
            _ => format_thousands(value, 2),
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix = s.strip_suffix(".png").unwrap_or(s);
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.file_prefix() == prefix)
            .ok_or_else(|| format!("Unknown chart: {}", s))
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_prefix())
    }
}

/// Two-point baseline/projection series for one chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub baseline: f64,
    pub projection: f64,
}

impl ChartSeries {
    pub fn from_metrics(kind: ChartKind, metrics: &DerivedMetrics) -> Self {
        let (baseline, projection) = match kind {
            ChartKind::AvoidedEmissions => (BASELINE_EMISSIONS, metrics.total_avoided_emissions()),
            ChartKind::ValorizedWaste => (BASELINE_VALORIZED_WASTE, metrics.valorized_waste),
            ChartKind::EstimatedRevenue => (BASELINE_REVENUE, metrics.estimated_revenue),
        };
        Self { kind, baseline, projection }
    }

    pub fn values(&self) -> [f64; 2] {
        [self.baseline, self.projection]
    }

    pub fn max_value(&self) -> f64 {
        self.baseline.max(self.projection)
    }

    /// max × 1.15, never below the chart's floor
    pub fn y_upper_limit(&self) -> f64 {
        (self.max_value() * Y_AXIS_HEADROOM).max(self.kind.axis_floor())
    }
}

/// The three chart series in display order
pub fn all_series(metrics: &DerivedMetrics) -> [ChartSeries; 3] {
    ChartKind::ALL.map(|kind| ChartSeries::from_metrics(kind, metrics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics_calculation::compute;
    use crate::models::inputs::SimulationInputs;

    #[test]
    fn series_follow_metrics_with_zero_baseline() {
        let [emissions, waste, revenue] = all_series(&compute(SimulationInputs::default()));
        assert_eq!(emissions.kind, ChartKind::AvoidedEmissions);
        assert_eq!(emissions.baseline, 0.0);
        assert!((emissions.projection - 31.8).abs() < 1e-9);
        assert_eq!(waste.values()[0], 0.0);
        assert!((waste.projection - 12.0).abs() < 1e-9);
        assert!((revenue.projection - 24_000.0).abs() < 1e-6);
    }

    #[test]
    fn upper_limit_adds_headroom() {
        let series = ChartSeries { kind: ChartKind::ValorizedWaste, baseline: 0.0, projection: 12.0 };
        assert!((series.y_upper_limit() - 13.8).abs() < 1e-9);
    }

    #[test]
    fn zero_series_uses_floor() {
        for kind in ChartKind::ALL {
            let series = ChartSeries { kind, baseline: 0.0, projection: 0.0 };
            let expected = if kind == ChartKind::EstimatedRevenue { 1000.0 } else { 1.0 };
            assert_eq!(series.y_upper_limit(), expected);
        }
    }

    #[test]
    fn small_revenue_is_floored() {
        let series = ChartSeries { kind: ChartKind::EstimatedRevenue, baseline: 0.0, projection: 500.0 };
        assert_eq!(series.y_upper_limit(), 1000.0);
    }

    #[test]
    fn annotations_follow_unit_rules() {
        assert_eq!(ChartKind::AvoidedEmissions.annotate(31.8), "31.80");
        assert_eq!(ChartKind::ValorizedWaste.annotate(1234.5), "1,234.50");
        assert_eq!(ChartKind::EstimatedRevenue.annotate(24_000.0), "$24,000");
    }

    #[test]
    fn parses_file_prefixes() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.file_prefix().parse::<ChartKind>(), Ok(kind));
            assert_eq!(kind.file_name().parse::<ChartKind>(), Ok(kind));
        }
        assert!("Otro_Grafico.png".parse::<ChartKind>().is_err());
    }
}
