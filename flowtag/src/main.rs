mod aggregator;
mod args;
mod error;
mod flow_record;
mod lookup_table;
mod protocol;
mod report;
mod tests;

use aggregator::Aggregator;
use anyhow::Context;
use args::{Cli, Config, ConfigFile};
use clap::Parser;
use log::{debug, error, info, warn};
use lookup_table::{LookupTable, UNTAGGED};
use report::ReportWriter;
use std::{fs::File, io::BufReader, time::Instant};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // If a config file is provided, load it
    let file_config = match cli.config_file.as_ref() {
        Some(config_path) => match confy::load_path::<ConfigFile>(config_path) {
            Ok(cfg_file) => cfg_file,
            Err(e) => {
                error!("Error loading configuration file: {:?}", e);
                eprintln!("Error: cannot load configuration file: {}", e);
                std::process::exit(1);
            }
        },
        None => ConfigFile::default(),
    };
    let config = Config::resolve(cli, file_config);
    debug!("Running with {:?}", config);

    match run(&config) {
        Ok(target) => println!("Analysis complete. Results written to {}", target),
        Err(err) => {
            error!("Run failed: {:?}", err);
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}

/// Loads the lookup table, counts the flow log and writes the report.
///
/// Returns the description of where the report was written.
fn run(config: &Config) -> anyhow::Result<String> {
    let start = Instant::now();

    let lookup = LookupTable::load_path(&config.lookup, config.duplicate_policy)
        .context("Error loading lookup file")?;
    info!("Loaded {} lookup entries", lookup.len());
    if lookup.is_empty() {
        warn!("Lookup table is empty, every record will be untagged");
    }

    let origin = format!("flow log {}", config.flow_log.display());
    let log_file = File::open(&config.flow_log)
        .map_err(|e| error::AnalyzerError::unreadable(&origin, e))
        .context("Error processing flow logs")?;

    let mut aggregator = Aggregator::new(lookup);
    aggregator
        .ingest_reader(BufReader::new(log_file), &origin)
        .context("Error processing flow logs")?;
    let stats = aggregator.stats();
    info!(
        "Processed {} records ({} untagged, {} lines skipped)",
        stats.accepted,
        aggregator.tag_count(UNTAGGED),
        stats.skipped
    );

    let report = report::render(aggregator.tag_counts(), aggregator.port_protocol_counts());
    let writer = ReportWriter::new(config.output, config.export_path.clone());
    writer.write(&report).context("Error writing results")?;

    info!("Duration: {:.4} seconds", start.elapsed().as_secs_f64());
    Ok(writer.target())
}
