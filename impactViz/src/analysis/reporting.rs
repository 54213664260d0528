use crate::analysis::formatting::{
    format_count, format_currency, format_tonnage, UNIT_EMISSIONS, UNIT_TONNES,
};
use crate::config::parameters::PARAMETERS;
use crate::models::inputs::SimulationInputs;
use crate::models::metrics::DerivedMetrics;

/// One labeled value on the metrics panel
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
    pub caption: &'static str,
}

/// The six display metrics, in panel order (two rows of three)
pub fn metric_cards(metrics: &DerivedMetrics) -> Vec<MetricCard> {
    vec![
        MetricCard {
            icon: "♻️",
            label: "Residuos Orgánicos Valorizados",
            value: format_tonnage(metrics.valorized_waste, UNIT_TONNES),
            caption: "Volumen de residuos transformados en productos de valor.",
        },
        MetricCard {
            icon: "🌎",
            label: "GEI Evitados (Relleno Sanitario)",
            value: format_tonnage(metrics.avoided_emissions_landfill, UNIT_EMISSIONS),
            caption: "Reducción de emisiones por desvío de residuos de rellenos sanitarios.",
        },
        MetricCard {
            icon: "🌱",
            label: "GEI Evitados (Sustitución Proteína)",
            value: format_tonnage(metrics.avoided_emissions_substitution, UNIT_EMISSIONS),
            caption: "Reducción de emisiones por reemplazo de proteínas convencionales de alto impacto.",
        },
        MetricCard {
            icon: "💰",
            label: "Ingresos Estimados",
            value: format_currency(metrics.estimated_revenue),
            caption: "Ingresos potenciales por la comercialización de la proteína de insectos.",
        },
        MetricCard {
            icon: "👨‍👩‍👧‍👦",
            label: "Empleos Generados",
            value: format_count(metrics.jobs_created),
            caption: "Estimación de empleos directos generados por el proyecto.",
        },
        MetricCard {
            icon: "🤝",
            label: "Interacciones en Cadena de Suministro",
            value: format_count(metrics.supply_chain_interactions),
            caption: "Número de alianzas y colaboraciones en la cadena de valor circular.",
        },
    ]
}

pub fn print_summary(inputs: &SimulationInputs, metrics: &DerivedMetrics) {
    println!("\nParámetros de Simulación");
    println!("----------------------------------------");
    for (spec, value) in PARAMETERS.iter().zip(inputs.values()) {
        println!("  {} {}", spec.label, spec.format_value(value));
    }

    println!("\nResultados Proyectados Anuales:");
    println!("----------------------------------------");
    for card in metric_cards(metrics) {
        println!("  {} {}: {}", card.icon, card.label, card.value);
    }
    println!(
        "  GEI Evitados Total: {}",
        format_tonnage(metrics.total_avoided_emissions(), UNIT_EMISSIONS)
    );
    println!("----------------------------------------");
}
