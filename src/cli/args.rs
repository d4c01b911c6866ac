use crate::serving::DatasetKind;
use crate::utils::constants::{
    DEFAULT_MONTHLY_FILENAME, DEFAULT_OUTPUT_DIR, DEFAULT_YEARLY_FILENAME,
    DEFAULT_YEAR_MAX_EXCLUSIVE,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meteo-datasets")]
#[command(about = "Build yearly and monthly weather datasets from per-city observation CSV files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        help = "Increase verbosity (-v = info, -vv = debug)"
    )]
    pub verbose: u8,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the aggregated yearly and monthly datasets and write them as CSV
    #[command(name = "build-datasets", alias = "build_datasets")]
    BuildDatasets {
        #[arg(long, help = "Root folder holding one CSV sub-folder per city")]
        data_folder: PathBuf,

        #[arg(long, help = "Station configuration file (YAML, JSON or TOML)")]
        config: PathBuf,

        #[arg(
            long,
            help = "Comma-separated cities, e.g. \"Paris,Lyon\" [default: every configured city]"
        )]
        cities: Option<String>,

        #[arg(long, default_value_t = DEFAULT_YEAR_MAX_EXCLUSIVE, help = "Exclusive year cutoff")]
        year_max: i32,

        #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(long, default_value = DEFAULT_YEARLY_FILENAME)]
        output_filename_yearly: String,

        #[arg(long, default_value = DEFAULT_MONTHLY_FILENAME)]
        output_filename_monthly: String,

        #[arg(long, default_value = ";", help = "Output field delimiter")]
        sep: String,

        #[arg(long, default_value = ";", help = "Input field delimiter")]
        input_sep: String,
    },

    /// Display records of a built dataset as served to readers
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, value_enum, default_value = "yearly")]
        kind: DatasetKind,

        #[arg(long, default_value = ";")]
        sep: String,

        #[arg(short, long, default_value = "3")]
        sample: usize,
    },
}
