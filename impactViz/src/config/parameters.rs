// Parameter specs - bounds, steps, defaults and help text for each simulation input
use crate::config::constants::*;

/// How a parameter value is shown next to its slider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDisplay {
    Integer,
    Decimal(usize),
    Percent, // Fraction shown as a percentage with one decimal
}

/// A bounded, stepped numeric input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub help: &'static str,
    pub display: ValueDisplay,
}

impl ParameterSpec {
    /// Clamp to the declared range and snap to the nearest step.
    /// Non-finite values fall back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }

        let bounded = value.clamp(self.min, self.max);
        let steps = ((bounded - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;

        // Strip accumulated float noise so 0.5 + 6 * 0.05 reads back as 0.8
        let snapped = (snapped * 1e6).round() / 1e6;
        snapped.clamp(self.min, self.max)
    }

    /// Parse a raw form/query value, falling back to the default
    pub fn parse(&self, raw: Option<&str>) -> f64 {
        raw.and_then(|s| s.trim().parse::<f64>().ok())
            .map(|v| self.clamp(v))
            .unwrap_or(self.default)
    }

    pub fn format_value(&self, value: f64) -> String {
        match self.display {
            ValueDisplay::Integer => format!("{:.0}", value),
            ValueDisplay::Decimal(places) => format!("{:.*}", places, value),
            ValueDisplay::Percent => format!("{:.1}%", value * 100.0),
        }
    }
}

pub const WASTE_PROCESSED: ParameterSpec = ParameterSpec {
    key: "waste",
    label: "Residuos Orgánicos Procesados (ton/año):",
    min: WASTE_PROCESSED_MIN,
    max: WASTE_PROCESSED_MAX,
    step: WASTE_PROCESSED_STEP,
    default: WASTE_PROCESSED_DEFAULT,
    help: "Volumen anual de residuos orgánicos procesados para la producción de proteína de insectos.",
    display: ValueDisplay::Integer,
};

pub const RECOVERY_RATE: ParameterSpec = ParameterSpec {
    key: "recovery",
    label: "Tasa de Aprovechamiento (%):",
    min: RECOVERY_RATE_MIN,
    max: RECOVERY_RATE_MAX,
    step: RECOVERY_RATE_STEP,
    default: RECOVERY_RATE_DEFAULT,
    help: "Porcentaje de residuos orgánicos que se convierten efectivamente en proteína valorizada.",
    display: ValueDisplay::Percent,
};

pub const LANDFILL_FACTOR: ParameterSpec = ParameterSpec {
    key: "landfill_factor",
    label: "Factor GEI Relleno Sanitario (tCO₂e/ton):",
    min: LANDFILL_FACTOR_MIN,
    max: LANDFILL_FACTOR_MAX,
    step: LANDFILL_FACTOR_STEP,
    default: LANDFILL_FACTOR_DEFAULT,
    help: "Emisiones de GEI evitadas por tonelada de residuo desviado de relleno sanitario.",
    display: ValueDisplay::Decimal(2),
};

pub const SUBSTITUTION_FACTOR: ParameterSpec = ParameterSpec {
    key: "substitution_factor",
    label: "Factor GEI Sustitución Proteína (tCO₂e/ton):",
    min: SUBSTITUTION_FACTOR_MIN,
    max: SUBSTITUTION_FACTOR_MAX,
    step: SUBSTITUTION_FACTOR_STEP,
    default: SUBSTITUTION_FACTOR_DEFAULT,
    help: "Emisiones de GEI evitadas por tonelada de proteína convencional sustituida (carne o soya).",
    display: ValueDisplay::Decimal(1),
};

pub const PROTEIN_PRICE: ParameterSpec = ParameterSpec {
    key: "price",
    label: "Precio Proteína Equivalente (USD/ton):",
    min: PROTEIN_PRICE_MIN,
    max: PROTEIN_PRICE_MAX,
    step: PROTEIN_PRICE_STEP,
    default: PROTEIN_PRICE_DEFAULT,
    help: "Precio de mercado de la proteína convencional que es sustituida por la proteína de insectos.",
    display: ValueDisplay::Integer,
};

/// All inputs in sidebar order
pub const PARAMETERS: [ParameterSpec; 5] = [
    WASTE_PROCESSED,
    RECOVERY_RATE,
    LANDFILL_FACTOR,
    SUBSTITUTION_FACTOR,
    PROTEIN_PRICE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values_to_bounds() {
        assert_eq!(WASTE_PROCESSED.clamp(0.0), 5.0);
        assert_eq!(WASTE_PROCESSED.clamp(1_000.0), 100.0);
        assert_eq!(PROTEIN_PRICE.clamp(-5.0), 1000.0);
        assert_eq!(RECOVERY_RATE.clamp(1.0), 0.9);
    }

    #[test]
    fn snaps_to_nearest_step() {
        assert_eq!(WASTE_PROCESSED.clamp(17.0), 15.0);
        assert_eq!(WASTE_PROCESSED.clamp(18.0), 20.0);
        assert_eq!(RECOVERY_RATE.clamp(0.81), 0.8);
        assert_eq!(LANDFILL_FACTOR.clamp(0.523), 0.52);
        assert_eq!(SUBSTITUTION_FACTOR.clamp(2.04), 2.0);
        assert_eq!(PROTEIN_PRICE.clamp(2049.0), 2000.0);
    }

    #[test]
    fn defaults_survive_clamping_unchanged() {
        for spec in PARAMETERS {
            assert_eq!(spec.clamp(spec.default), spec.default, "{}", spec.key);
        }
    }

    #[test]
    fn non_finite_values_fall_back_to_default() {
        assert_eq!(RECOVERY_RATE.clamp(f64::NAN), RECOVERY_RATE_DEFAULT);
        assert_eq!(PROTEIN_PRICE.clamp(f64::INFINITY), PROTEIN_PRICE_DEFAULT);
    }

    #[test]
    fn parse_handles_missing_and_garbage_input() {
        assert_eq!(WASTE_PROCESSED.parse(None), 15.0);
        assert_eq!(WASTE_PROCESSED.parse(Some("abc")), 15.0);
        assert_eq!(WASTE_PROCESSED.parse(Some(" 40 ")), 40.0);
        assert_eq!(WASTE_PROCESSED.parse(Some("250")), 100.0);
    }

    #[test]
    fn formats_values_for_display() {
        assert_eq!(RECOVERY_RATE.format_value(0.8), "80.0%");
        assert_eq!(LANDFILL_FACTOR.format_value(0.52), "0.52");
        assert_eq!(SUBSTITUTION_FACTOR.format_value(2.0), "2.0");
        assert_eq!(PROTEIN_PRICE.format_value(2000.0), "2000");
    }
}
