use serde::Serialize;

/// Annual indicators derived from one `SimulationInputs` tuple.
/// Recomputed on every pass, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub valorized_waste: f64,                 // ton/año
    pub avoided_emissions_landfill: f64,      // tCO2e/año
    pub avoided_emissions_substitution: f64,  // tCO2e/año
    pub estimated_revenue: f64,               // USD/año
    pub jobs_created: u32,
    pub supply_chain_interactions: u32,
}

impl DerivedMetrics {
    /// Projection value of the emissions chart
    pub fn total_avoided_emissions(&self) -> f64 {
        self.avoided_emissions_landfill + self.avoided_emissions_substitution
    }
}
