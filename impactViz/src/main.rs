use std::path::Path;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::info;

use p5_impact::analysis::metrics_calculation::compute;
use p5_impact::analysis::reporting::print_summary;
use p5_impact::charts::export::{write_chart_png, write_combined_png};
use p5_impact::charts::series::{all_series, ChartKind, ChartSeries};
use p5_impact::charts::svg::render_single_figure;
use p5_impact::cli::cli::{Args, Command};
use p5_impact::config::dashboard_config::DashboardConfig;
use p5_impact::models::inputs::SimulationInputs;
use p5_impact::server::app::serve;
use p5_impact::utils::csv_export::{create_run_directory, write_metrics_csv};
use p5_impact::utils::logging::{self, FileIOType, OperationCategory, RenderType};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())?;

    let mut config = {
        let _timing = logging::start_timing("load_config",
            OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });
        DashboardConfig::load(args.config())?
    };

    match args.command().clone() {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_address = bind;
            }
            println!("Visualizador de Impactos - Proyecto P5 (http://{})", config.bind_address);
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime.block_on(serve(config))?;
        }
        Command::Report { inputs } => {
            let inputs = inputs.to_inputs();
            let metrics = {
                let _timing = logging::start_timing("compute", OperationCategory::Computation);
                compute(inputs)
            };
            print_summary(&inputs, &metrics);
        }
        Command::Export { inputs, output_dir, csv } => {
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            run_export(&config, inputs.to_inputs(), csv)?;
        }
    }

    logging::print_timing_report();
    Ok(())
}

fn run_export(config: &DashboardConfig, inputs: SimulationInputs, with_csv: bool) -> anyhow::Result<()> {
    let metrics = compute(inputs);
    let run_dir = create_run_directory(&config.output_dir)?;
    info!(dir = %run_dir.display(), "exporting charts");

    let progress = ProgressBar::new(ChartKind::ALL.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .context("invalid progress template")?,
    );

    let written = ChartKind::ALL
        .par_iter()
        .map(|&kind| {
            let _timing = logging::start_timing("export_chart",
                OperationCategory::Rendering { subcategory: RenderType::Export });
            let figure = render_single_figure(&ChartSeries::from_metrics(kind, &metrics));
            let path = write_chart_png(&run_dir, kind, &figure, config.export_dpi)
                .with_context(|| format!("failed to export {}", kind.file_name()))?;
            progress.inc(1);
            progress.set_message(kind.file_name());
            Ok(path)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    progress.finish_with_message("done");

    for path in &written {
        println!("Wrote {}", path.display());
    }

    let combined = {
        let _timing = logging::start_timing("export_combined",
            OperationCategory::Rendering { subcategory: RenderType::Export });
        write_combined_png(&run_dir, &all_series(&metrics), config.export_dpi)
            .context("failed to export the combined figure")?
    };
    println!("Wrote {}", combined.display());

    if with_csv {
        let _timing = logging::start_timing("write_metrics_csv",
            OperationCategory::FileIO { subcategory: FileIOType::CsvSave });
        let path = write_metrics_csv(&run_dir, &inputs, &metrics)?;
        println!("Wrote {}", path.display());
    }

    print_summary(&inputs, &metrics);
    println!("Charts exported to {}", display_dir(&run_dir));
    Ok(())
}

fn display_dir(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
