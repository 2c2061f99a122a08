use anyhow::Result;
use clap::{Parser, Subcommand};
use log::warn;

use nfcpins::cli::{handle_export_command, handle_pin_command, ExportCommands, PinCommands};
use nfcpins::config::{paths::PinPaths, settings::Settings};
use nfcpins::logging::{init_logging, normalize_level};
use nfcpins::storage::Storage;

#[derive(Parser)]
#[command(
    name = "nfcpins",
    version,
    about = "NFC pin profiles with CSV and contact-card export",
    long_about = "nfcpins manages NFC-linked profile pins: generate codes, let \
                  owners claim them and fill out a profile, count profile views \
                  and contact downloads, and export pins as CSV for the admin \
                  dashboard."
)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace); RUST_LOG wins if set
    #[arg(long, global = true, env = "NFC_PINS_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pin management commands
    #[command(subcommand)]
    Pin(PinCommands),

    /// Export pins to CSV
    #[command(subcommand)]
    Export(ExportCommands),

    /// Initialize the data directory and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PinPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.log_level.as_deref() {
        Some(level) => init_logging(level)?,
        None => init_logging(settings.effective_log_level())?,
    }
    if let Err(e) = normalize_level(&settings.log_level) {
        warn!(
            "ignoring log_level in {}: {}",
            paths.settings_file().display(),
            e
        );
    }

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Pin(cmd)) => {
            handle_pin_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing nfc-pins at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'nfcpins pin generate 10' to create your first pins.");
        }
        Some(Commands::Config) => {
            println!("nfc-pins Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Timestamp zone:   {:?}", settings.timestamp_zone);
            println!("  Timestamp format: {}", settings.timestamp_format);
            println!("  Profile base URL: {}", settings.profile_base_url);
            println!("  Code length:      {}", settings.code_length);
            println!("  Log level:        {}", settings.log_level);
        }
        None => {
            println!("nfcpins - NFC pin profiles");
            println!();
            println!("Run 'nfcpins --help' for usage information.");
        }
    }

    Ok(())
}
