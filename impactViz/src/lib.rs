// Main module declarations for the P5 impact visualizer

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod parameters;
    pub mod dashboard_config;
}

// Model definitions
pub mod models {
    pub mod inputs;
    pub mod metrics;
}

// Metric computation and display
pub mod analysis {
    pub mod metrics_calculation;
    pub mod formatting;
    pub mod reporting;
}

// Chart series, SVG figures and PNG export
pub mod charts {
    pub mod series;
    pub mod svg;
    pub mod export;
}

// Remote logo fetching
pub mod branding {
    pub mod logos;
}

// HTTP dashboard
pub mod server {
    pub mod app;
    pub mod handlers;
    pub mod page;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::analysis::metrics_calculation::compute;
pub use crate::charts::series::{ChartKind, ChartSeries};
pub use crate::config::dashboard_config::DashboardConfig;
pub use crate::models::inputs::SimulationInputs;
pub use crate::models::metrics::DerivedMetrics;
