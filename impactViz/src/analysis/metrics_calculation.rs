use crate::config::constants::{JOBS_CREATED, SUPPLY_CHAIN_INTERACTIONS};
use crate::models::inputs::SimulationInputs;
use crate::models::metrics::DerivedMetrics;

/// Apply the fixed-coefficient impact formulas. Pure and infallible:
/// every input is already bounded by its slider.
pub fn compute(inputs: SimulationInputs) -> DerivedMetrics {
    let valorized_waste = inputs.waste_processed * inputs.recovery_rate;
    let avoided_emissions_landfill = inputs.waste_processed * inputs.landfill_emission_factor;
    let avoided_emissions_substitution = valorized_waste * inputs.substitution_emission_factor;
    let estimated_revenue = valorized_waste * inputs.protein_price;

    DerivedMetrics {
        valorized_waste,
        avoided_emissions_landfill,
        avoided_emissions_substitution,
        estimated_revenue,
        jobs_created: JOBS_CREATED,
        supply_chain_interactions: SUPPLY_CHAIN_INTERACTIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parameters::{PARAMETERS, RECOVERY_RATE, WASTE_PROCESSED};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    /// Every value on a slider's step grid
    fn grid(min: f64, max: f64, step: f64) -> Vec<f64> {
        let count = ((max - min) / step).round() as usize;
        (0..=count).map(|i| min + i as f64 * step).collect()
    }

    #[test]
    fn default_scenario() {
        let metrics = compute(SimulationInputs::default());
        assert_close(metrics.valorized_waste, 12.0);
        assert_close(metrics.avoided_emissions_landfill, 7.8);
        assert_close(metrics.avoided_emissions_substitution, 24.0);
        assert_close(metrics.estimated_revenue, 24_000.0);
        assert_close(metrics.total_avoided_emissions(), 31.8);
    }

    #[test]
    fn upper_bound_scenario() {
        let metrics = compute(SimulationInputs {
            waste_processed: 100.0,
            recovery_rate: 0.9,
            landfill_emission_factor: 0.6,
            substitution_emission_factor: 2.5,
            protein_price: 5000.0,
        });
        assert_close(metrics.valorized_waste, 90.0);
        assert_close(metrics.avoided_emissions_landfill, 60.0);
        assert_close(metrics.avoided_emissions_substitution, 225.0);
        assert_close(metrics.estimated_revenue, 450_000.0);
    }

    #[test]
    fn compute_is_deterministic() {
        let inputs = SimulationInputs::bounded(45.0, 0.7, 0.43, 1.9, 3700.0);
        assert_eq!(compute(inputs), compute(inputs));
    }

    #[test]
    fn valorized_waste_never_exceeds_processed_waste() {
        let wastes = grid(WASTE_PROCESSED.min, WASTE_PROCESSED.max, WASTE_PROCESSED.step);
        let rates = grid(RECOVERY_RATE.min, RECOVERY_RATE.max, RECOVERY_RATE.step);
        for &waste in &wastes {
            for &rate in &rates {
                let inputs = SimulationInputs::bounded(waste, rate, 0.52, 2.0, 2000.0);
                let metrics = compute(inputs);
                assert!(metrics.valorized_waste <= inputs.waste_processed);
            }
        }
    }

    #[test]
    fn substitution_and_revenue_scale_linearly_with_recovery_rate() {
        let base = SimulationInputs::bounded(40.0, 0.5, 0.5, 2.2, 3000.0);
        let reference = compute(base);
        for rate in grid(RECOVERY_RATE.min, RECOVERY_RATE.max, RECOVERY_RATE.step) {
            let metrics = compute(SimulationInputs { recovery_rate: rate, ..base });
            let ratio = rate / base.recovery_rate;
            assert_close(metrics.avoided_emissions_substitution, reference.avoided_emissions_substitution * ratio);
            assert_close(metrics.estimated_revenue, reference.estimated_revenue * ratio);
            assert_close(metrics.avoided_emissions_landfill, reference.avoided_emissions_landfill);
        }
    }

    #[test]
    fn fixed_indicators_ignore_inputs() {
        for spec in PARAMETERS {
            for value in [spec.min, spec.default, spec.max] {
                let mut values = SimulationInputs::default().values();
                let index = PARAMETERS.iter().position(|p| p.key == spec.key).unwrap_or(0);
                values[index] = value;
                let metrics = compute(SimulationInputs::bounded(
                    values[0], values[1], values[2], values[3], values[4],
                ));
                assert_eq!(metrics.jobs_created, 2);
                assert_eq!(metrics.supply_chain_interactions, 3);
            }
        }
    }
}
