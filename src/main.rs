//! Flightdelay: Flight Delay Analytics CLI
//!
//! Loads a flight delay CSV, applies the requested filters and prints the
//! dashboard: KPIs, delay per airline/month/route, delay composition and
//! extreme delays. The filtered data is exported as CSV.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::{style, Term};

use flightdelay::cli::{confirm_export, prompt_input_path, Cli};
use flightdelay::pipeline::schema::EXPORT_COLUMN_COUNT;
use flightdelay::pipeline::{export_csv, load_dataset_with_progress, overwrites_input, Analysis};
use flightdelay::report::{
    export_dashboard_json, missing_table, options_table, overview_table, print_table, Dashboard,
    ExportParams,
};
use flightdelay::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let interactive = !cli.no_confirm && Term::stdout().is_term();

    // No upload yet: prompt, or explain and stop without computing anything
    let input = match cli.input.clone() {
        Some(path) => Some(path),
        None if interactive => prompt_input_path()?,
        None => None,
    };
    let Some(input) = input else {
        print_warning("No flight delay CSV provided. Use -i/--input to select a file (e.g. Flight_delay.csv).");
        return Ok(());
    };

    print_banner(env!("CARGO_PKG_VERSION"));

    // Load, clean and enrich
    let step_start = Instant::now();
    let loaded = load_dataset_with_progress(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let analysis = Analysis::new(loaded);
    let dataset = analysis.dataset();

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", dataset.len());
    println!("      Columns: {}", EXPORT_COLUMN_COUNT);
    print_table("PREVIEW", &overview_table(dataset, 5));

    let stats = analysis.stats();
    if stats.missing_ratios().iter().any(|(_, ratio)| *ratio > 0.0) {
        print_table("MISSING VALUES", &missing_table(stats));
        print_count(
            "delay cell(s) treated as no delay",
            stats.zero_filled(),
            Some("(CarrierDelay..LateAircraftDelay, ArrDelay)"),
        );
    }
    print_success(&format!("Data cleaned in {:.2?}", step_start.elapsed()));

    if cli.list_options {
        print_table("FILTER OPTIONS", &options_table(analysis.options()));
        return Ok(());
    }

    // Filter
    let filter = cli.filter_spec(analysis.options().date_bounds);
    let output_path = cli.output_path(&input);

    print_step_header(1, "Filter");
    print_config(&input, output_path.as_deref(), &filter);

    let spinner = create_spinner("Applying filters and aggregating...");
    let view = analysis.view(&filter);
    if view.summary.is_empty() {
        finish_with_warning(&spinner, "No flights match the selected filters");
    } else {
        finish_with_success(
            &spinner,
            &format!("{} of {} flights selected", view.dataset.len(), dataset.len()),
        );
    }

    // Dashboard
    print_step_header(2, "Dashboard");
    let anomalies = if cli.anomalies_in_view {
        analysis.anomalies_in(&view, cli.anomaly_preview)
    } else {
        analysis.anomalies(cli.anomaly_preview)
    };
    Dashboard {
        summary: &view.summary,
        insights: &view.insights,
        anomalies: &anomalies,
        top_routes: cli.top_routes,
    }
    .display();

    // Export
    print_step_header(3, "Export");
    match &output_path {
        Some(path) if overwrites_input(&input, path) => print_warning(&format!(
            "Refusing to overwrite the input file {}; choose another path with -o",
            path.display()
        )),
        Some(path) => {
            let proceed = !interactive || confirm_export(path, view.dataset.len())?;
            if proceed {
                export_csv(&view.dataset, path)
                    .with_context(|| format!("Failed to export {}", path.display()))?;
                print_success(&format!("Filtered CSV written to {}", path.display()));
            } else {
                print_info("CSV export skipped");
            }
        }
        None => print_info("CSV export disabled"),
    }

    if let Some(json_path) = &cli.report_json {
        let input_file = input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            total_flights: dataset.len(),
            filter: &filter,
            options: analysis.options(),
        };
        export_dashboard_json(&view.summary, &view.insights, &anomalies, json_path, &params)?;
        print_success(&format!("Dashboard JSON written to {}", json_path.display()));
    }

    print_completion();
    Ok(())
}
