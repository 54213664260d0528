use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::constants::*;
use crate::models::inputs::SimulationInputs;

#[derive(Parser)]
#[command(author, version, about = "P5 impact visualizer: insect protein from organic waste", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, global = true, default_value_t = false)]
    debug_logging: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the interactive dashboard over HTTP
    Serve {
        #[arg(short, long, help = "Address to bind, overrides the config file")]
        bind: Option<String>,
    },
    /// Print the projected metrics for one set of inputs
    Report {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Write the three chart PNGs (and optionally a metrics CSV)
    Export {
        #[command(flatten)]
        inputs: InputArgs,

        #[arg(short, long, help = "Output root, overrides the config file")]
        output_dir: Option<PathBuf>,

        #[arg(long, default_value_t = false, help = "Also write metricas.csv")]
        csv: bool,
    },
}

/// Simulation inputs as flags; values are clamped to the slider ranges
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(long, default_value_t = WASTE_PROCESSED_DEFAULT, help = "Organic waste processed (ton/año)")]
    waste: f64,

    #[arg(long, default_value_t = RECOVERY_RATE_DEFAULT, help = "Recovery rate (fraction)")]
    recovery: f64,

    #[arg(long, default_value_t = LANDFILL_FACTOR_DEFAULT, help = "Landfill GHG factor (tCO2e/ton)")]
    landfill_factor: f64,

    #[arg(long, default_value_t = SUBSTITUTION_FACTOR_DEFAULT, help = "Protein substitution GHG factor (tCO2e/ton)")]
    substitution_factor: f64,

    #[arg(long, default_value_t = PROTEIN_PRICE_DEFAULT, help = "Equivalent protein price (USD/ton)")]
    price: f64,
}

impl InputArgs {
    pub fn to_inputs(&self) -> SimulationInputs {
        SimulationInputs::bounded(
            self.waste,
            self.recovery,
            self.landfill_factor,
            self.substitution_factor,
            self.price,
        )
    }
}

impl Args {
    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_flags_are_clamped() {
        let args = Args::try_parse_from([
            "p5-impact", "export", "--waste", "250", "--recovery", "0.62", "--csv",
        ])
        .expect("parse");
        match args.command() {
            Command::Export { inputs, csv, output_dir } => {
                let inputs = inputs.to_inputs();
                assert_eq!(inputs.waste_processed, 100.0);
                assert_eq!(inputs.recovery_rate, 0.6);
                assert_eq!(inputs.protein_price, 2000.0);
                assert!(*csv);
                assert!(output_dir.is_none());
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let args = Args::try_parse_from(["p5-impact", "serve", "--bind", "0.0.0.0:80", "--enable-timing"])
            .expect("parse");
        assert!(args.enable_timing());
        assert!(matches!(args.command(), Command::Serve { bind: Some(b) } if b == "0.0.0.0:80"));
    }

    #[test]
    fn report_defaults_match_sliders() {
        let args = Args::try_parse_from(["p5-impact", "report"]).expect("parse");
        match args.command() {
            Command::Report { inputs } => assert_eq!(inputs.to_inputs(), SimulationInputs::default()),
            _ => panic!("expected report"),
        }
    }
}
