//! Command implementations for the TDP CLI.
//!
//! Provides subcommands for browsing the component catalog, sizing a
//! configuration and exporting its CSV report, and projecting energy cost
//! for a known wattage.

use clap::{Args, Subcommand};
use std::path::PathBuf;
use tdp_calc::projection::{
    DEFAULT_PROJECTION_YEARS, DEFAULT_PSU_EFFICIENCY, DEFAULT_TARIFF_PER_KWH,
};
use tdp_calc::ProjectionBasis;

pub mod calculate;
pub mod catalog;
pub mod parts;
pub mod project;
pub mod selection;

/// Where the component catalog comes from.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Directory containing parts.csv and gpus.csv
    #[arg(long, default_value = "fixtures")]
    pub catalog_dir: PathBuf,

    /// Base URL of the hosted catalog API (overrides --catalog-dir)
    #[arg(long, env = "TDP_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// API key for the hosted catalog
    #[arg(long, env = "TDP_CATALOG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Tariff, PSU efficiency and long-range horizon.
#[derive(Args, Debug, Clone)]
pub struct BasisArgs {
    /// Electricity tariff in currency units per kWh
    #[arg(long, default_value_t = DEFAULT_TARIFF_PER_KWH)]
    pub tariff: f64,

    /// PSU efficiency used for sizing, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_PSU_EFFICIENCY)]
    pub efficiency: f64,

    /// Number of years for the long-range projection
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    pub years: u32,
}

impl From<&BasisArgs> for ProjectionBasis {
    fn from(args: &BasisArgs) -> Self {
        ProjectionBasis {
            tariff_per_kwh: args.tariff,
            psu_efficiency: args.efficiency,
            years: args.years,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the component catalog grouped by category
    Parts {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Size a configuration and export its CSV report
    Calculate {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        basis: BasisArgs,

        /// Line item as CATEGORY:MODEL[:QTY], repeatable
        #[arg(short = 'i', long = "item")]
        items: Vec<String>,

        /// JSON file with an array of {category, model, quantity}
        #[arg(short = 's', long)]
        selection: Option<PathBuf>,

        /// Directory the report is written to
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,

        /// Skip writing the CSV report
        #[arg(long)]
        no_export: bool,

        /// Report date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print the configuration and projections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Project PSU size and energy cost for a known total TDP
    Project {
        /// Total TDP in watts
        #[arg(short = 'w', long)]
        watts: f64,

        #[command(flatten)]
        basis: BasisArgs,

        /// Print the projections as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Parts { catalog, json } => parts::run_parts(&catalog, json).await,
        Command::Calculate {
            catalog,
            basis,
            items,
            selection,
            output_dir,
            no_export,
            date,
            json,
        } => {
            let options = calculate::CalculateOptions {
                items,
                selection,
                output_dir,
                export: !no_export,
                date,
                json,
            };
            calculate::run_calculate(&catalog, &basis, &options).await
        }
        Command::Project { watts, basis, json } => project::run_project(watts, &basis, json),
    }
}
