use crate::cli::args::{Cli, Commands};
use crate::config::StationsConfig;
use crate::error::{ProcessingError, Result};
use crate::processors::MultiCityProcessor;
use crate::serving::{DatasetCache, DatasetKind};
use crate::utils::progress::ProgressReporter;
use crate::utils::{init_logging, parse_delimiter};
use crate::writers::{CsvDatasetWriter, WriteSummary};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options of one `build-datasets` run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub data_folder: PathBuf,
    pub config: PathBuf,
    pub cities: Option<String>,
    pub year_max: i32,
    pub output_dir: PathBuf,
    pub output_filename_yearly: String,
    pub output_filename_monthly: String,
    pub sep: String,
    pub input_sep: String,
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::BuildDatasets {
            data_folder,
            config,
            cities,
            year_max,
            output_dir,
            output_filename_yearly,
            output_filename_monthly,
            sep,
            input_sep,
        } => {
            let options = BuildOptions {
                data_folder,
                config,
                cities,
                year_max,
                output_dir,
                output_filename_yearly,
                output_filename_monthly,
                sep,
                input_sep,
            };
            let summary = build_datasets(&options, false)?;

            println!("Done!");
            println!("{}", summary.summary());
        }

        Commands::Info {
            file,
            kind,
            sep,
            sample,
        } => {
            show_dataset(&file, kind, &sep, sample).await?;
        }
    }

    Ok(())
}

/// Build both datasets and write them. The run aborts on the first failing city.
pub fn build_datasets(options: &BuildOptions, silent: bool) -> Result<WriteSummary> {
    if !options.data_folder.is_dir() {
        return Err(ProcessingError::DataAccess(format!(
            "Data folder not found: {}",
            options.data_folder.display()
        )));
    }

    let output_delimiter = parse_delimiter(&options.sep)?;
    let input_delimiter = parse_delimiter(&options.input_sep)?;

    let config = StationsConfig::from_file(&options.config)?;
    let cities = config.resolve_cities(options.cities.as_deref())?;

    if !silent {
        println!(
            "Weather dataset build\n\
             - data-folder: {}\n\
             - config: {}\n\
             - cities: {}\n\
             - year-max: {}\n\
             - out: {}\n",
            options.data_folder.display(),
            options.config.display(),
            cities.join(", "),
            options.year_max,
            options.output_dir.display()
        );
    }

    let processor = MultiCityProcessor::new(&options.data_folder, config)
        .with_year_max_exclusive(options.year_max)
        .with_delimiter(input_delimiter);

    let progress = if silent {
        ProgressReporter::silent()
    } else {
        ProgressReporter::new(cities.len() as u64, "Building datasets", false)
    };
    let datasets = processor.process_all(&cities, Some(&progress))?;
    progress.finish_with_message(&format!("Built datasets for {} cities", cities.len()));

    let writer = CsvDatasetWriter::new().with_delimiter(output_delimiter);
    let summary = writer.write_datasets(
        &datasets,
        &options.output_dir,
        &options.output_filename_yearly,
        &options.output_filename_monthly,
    )?;

    info!(
        "Build complete: {} yearly rows, {} monthly rows",
        summary.yearly_rows, summary.monthly_rows
    );
    Ok(summary)
}

async fn show_dataset(file: &Path, kind: DatasetKind, sep: &str, sample: usize) -> Result<()> {
    let cache = DatasetCache::new(file, kind).with_delimiter(parse_delimiter(sep)?);
    let records = cache.get().await?;

    println!("Dataset: {} ({:?})", file.display(), kind);
    println!("Records: {}", records.len());

    if sample > 0 {
        let shown = &records[..sample.min(records.len())];
        println!("\nSample Records (showing {} records):", shown.len());
        println!("{}", serde_json::to_string_pretty(shown)?);
    }

    Ok(())
}
