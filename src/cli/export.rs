//! CLI commands for data export
//!
//! Each export renders the selected pins with a column schema and delivers
//! the CSV document either into a directory or to stdout.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Settings;
use crate::error::{PinError, PinResult};
use crate::export::{ColumnSchema, DirectoryDelivery, StdoutDelivery, TabularExporter};
use crate::models::{TimestampFormatter, TimestampZone};
use crate::services::{PinFilter, PinService};
use crate::storage::Storage;

/// Which pins an export includes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PinSelection {
    /// Every pin
    All,
    /// Pins with an owner
    Claimed,
    /// Pins without an owner
    Unclaimed,
}

impl From<PinSelection> for PinFilter {
    fn from(selection: PinSelection) -> Self {
        match selection {
            PinSelection::All => PinFilter::All,
            PinSelection::Claimed => PinFilter::Claimed,
            PinSelection::Unclaimed => PinFilter::Unclaimed,
        }
    }
}

/// Where and how to deliver an export
#[derive(Args, Debug, Clone)]
pub struct ExportTarget {
    /// Directory to write into (defaults to the configured export directory)
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the document to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// File name of the exported document
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Pins to include
    #[arg(long, value_enum)]
    pub only: Option<PinSelection>,

    /// Time zone for timestamps (local or utc), overriding settings
    #[arg(long)]
    pub zone: Option<String>,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export claimed pins (code, owner and contact basics)
    Claimed {
        #[command(flatten)]
        target: ExportTarget,
    },

    /// Export view and download analytics
    Analytics {
        #[command(flatten)]
        target: ExportTarget,
    },

    /// Export every field of every pin
    Dashboard {
        #[command(flatten)]
        target: ExportTarget,
    },

    /// Export with a column schema loaded from a JSON file
    Custom {
        /// Path to the schema JSON
        schema: PathBuf,

        #[command(flatten)]
        target: ExportTarget,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> PinResult<()> {
    match cmd {
        ExportCommands::Claimed { target } => run_export(
            storage,
            settings,
            ColumnSchema::claimed_pins(),
            PinFilter::Claimed,
            "claimed_pins.csv",
            target,
        ),
        ExportCommands::Analytics { target } => run_export(
            storage,
            settings,
            ColumnSchema::analytics(),
            PinFilter::Claimed,
            "analytics.csv",
            target,
        ),
        ExportCommands::Dashboard { target } => run_export(
            storage,
            settings,
            ColumnSchema::dashboard(),
            PinFilter::All,
            "pins.csv",
            target,
        ),
        ExportCommands::Custom { schema, target } => {
            let schema = ColumnSchema::from_json_file(&schema)?;
            run_export(storage, settings, schema, PinFilter::All, "export.csv", target)
        }
    }
}

fn run_export(
    storage: &Storage,
    settings: &Settings,
    schema: ColumnSchema,
    default_filter: PinFilter,
    default_filename: &str,
    target: ExportTarget,
) -> PinResult<()> {
    let filter = target.only.map(PinFilter::from).unwrap_or(default_filter);
    let records = PinService::new(storage).list(filter)?;

    let exporter = TabularExporter::new(timestamp_formatter(settings, target.zone.as_deref())?);
    let filename = target
        .filename
        .unwrap_or_else(|| default_filename.to_string());

    if target.stdout {
        return exporter.export_csv(&records, &schema, &filename, &StdoutDelivery);
    }

    let dir = target
        .output
        .unwrap_or_else(|| storage.paths().export_dir());
    let delivery = DirectoryDelivery::new(dir);
    exporter.export_csv(&records, &schema, &filename, &delivery)?;

    println!(
        "Exported {} pins to: {}",
        records.len(),
        delivery.target_path(&filename)?.display()
    );
    Ok(())
}

fn timestamp_formatter(settings: &Settings, zone: Option<&str>) -> PinResult<TimestampFormatter> {
    match zone {
        None => Ok(settings.timestamp_formatter()),
        Some(name) => {
            let zone = TimestampZone::parse(name).ok_or_else(|| {
                PinError::Validation(format!("Invalid time zone: '{}'. Use local or utc", name))
            })?;
            Ok(TimestampFormatter::new(zone, settings.timestamp_format.clone()))
        }
    }
}
