use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::parameters::{
    LANDFILL_FACTOR, PROTEIN_PRICE, RECOVERY_RATE, SUBSTITUTION_FACTOR, WASTE_PROCESSED,
};

/// The five user-adjustable inputs of one render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub waste_processed: f64,               // tons/year
    pub recovery_rate: f64,                 // fraction (0.5-0.9)
    pub landfill_emission_factor: f64,      // tCO2e per ton diverted
    pub substitution_emission_factor: f64,  // tCO2e per ton of protein replaced
    pub protein_price: f64,                 // USD/ton
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            waste_processed: WASTE_PROCESSED.default,
            recovery_rate: RECOVERY_RATE.default,
            landfill_emission_factor: LANDFILL_FACTOR.default,
            substitution_emission_factor: SUBSTITUTION_FACTOR.default,
            protein_price: PROTEIN_PRICE.default,
        }
    }
}

impl SimulationInputs {
    /// Build an input tuple with every value clamped and snapped to its slider
    pub fn bounded(
        waste_processed: f64,
        recovery_rate: f64,
        landfill_emission_factor: f64,
        substitution_emission_factor: f64,
        protein_price: f64,
    ) -> Self {
        Self {
            waste_processed: WASTE_PROCESSED.clamp(waste_processed),
            recovery_rate: RECOVERY_RATE.clamp(recovery_rate),
            landfill_emission_factor: LANDFILL_FACTOR.clamp(landfill_emission_factor),
            substitution_emission_factor: SUBSTITUTION_FACTOR.clamp(substitution_emission_factor),
            protein_price: PROTEIN_PRICE.clamp(protein_price),
        }
    }

    /// Read inputs from query parameters keyed by each parameter's `key`
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).map(String::as_str);
        Self {
            waste_processed: WASTE_PROCESSED.parse(get(WASTE_PROCESSED.key)),
            recovery_rate: RECOVERY_RATE.parse(get(RECOVERY_RATE.key)),
            landfill_emission_factor: LANDFILL_FACTOR.parse(get(LANDFILL_FACTOR.key)),
            substitution_emission_factor: SUBSTITUTION_FACTOR.parse(get(SUBSTITUTION_FACTOR.key)),
            protein_price: PROTEIN_PRICE.parse(get(PROTEIN_PRICE.key)),
        }
    }

    pub fn to_query_string(&self) -> String {
        format!(
            "{}={}&{}={}&{}={}&{}={}&{}={}",
            WASTE_PROCESSED.key, self.waste_processed,
            RECOVERY_RATE.key, self.recovery_rate,
            LANDFILL_FACTOR.key, self.landfill_emission_factor,
            SUBSTITUTION_FACTOR.key, self.substitution_emission_factor,
            PROTEIN_PRICE.key, self.protein_price,
        )
    }

    /// Values in sidebar order, matching `PARAMETERS`
    pub fn values(&self) -> [f64; 5] {
        [
            self.waste_processed,
            self.recovery_rate,
            self.landfill_emission_factor,
            self.substitution_emission_factor,
            self.protein_price,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_query_yields_defaults() {
        assert_eq!(SimulationInputs::from_query(&HashMap::new()), SimulationInputs::default());
    }

    #[test]
    fn query_values_are_bounded() {
        let inputs = SimulationInputs::from_query(&query(&[
            ("waste", "500"),
            ("recovery", "0.3"),
            ("landfill_factor", "0.55"),
            ("substitution_factor", "nope"),
            ("price", "4200"),
        ]));
        assert_eq!(inputs.waste_processed, 100.0);
        assert_eq!(inputs.recovery_rate, 0.5);
        assert_eq!(inputs.landfill_emission_factor, 0.55);
        assert_eq!(inputs.substitution_emission_factor, 2.0);
        assert_eq!(inputs.protein_price, 4200.0);
    }

    #[test]
    fn query_string_round_trips_through_from_query() {
        let inputs = SimulationInputs::bounded(35.0, 0.65, 0.47, 1.8, 3300.0);
        let params: HashMap<String, String> = inputs
            .to_query_string()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(SimulationInputs::from_query(&params), inputs);
    }
}
