//! Pin CLI commands
//!
//! Implements CLI commands for the pin lifecycle and the admin views.

use clap::Subcommand;
use std::path::PathBuf;

use super::export::PinSelection;
use crate::config::Settings;
use crate::display::{format_pin_details, format_pin_list, format_stats};
use crate::error::PinResult;
use crate::export::{export_vcard, DirectoryDelivery, StdoutDelivery};
use crate::services::{PinFilter, PinService, ProfileUpdate};
use crate::storage::Storage;

/// Pin subcommands
#[derive(Subcommand, Debug)]
pub enum PinCommands {
    /// Create unclaimed pins with random codes
    Generate {
        /// Number of pins to create
        #[arg(default_value = "1")]
        count: usize,
        /// Code length (defaults to the configured length)
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Attach a user to a pin
    Claim {
        /// Pin code
        code: String,
        /// User id
        uid: String,
    },
    /// Detach the user and clear the profile
    Release {
        /// Pin code
        code: String,
    },
    /// Edit the profile of a claimed pin (empty value clears a field)
    Update {
        /// Pin code
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Photo URL
        #[arg(long)]
        photo: Option<String>,
        /// Attached file URL
        #[arg(long)]
        file: Option<String>,
        /// Bio / notes
        #[arg(long)]
        info: Option<String>,
    },
    /// Open the public profile (counts a view)
    View {
        /// Pin code
        code: String,
    },
    /// Count a contact download without writing a card
    Download {
        /// Pin code
        code: String,
    },
    /// Show a pin without counting a view
    Show {
        /// Pin code
        code: String,
    },
    /// List pins
    List {
        /// Pins to include
        #[arg(long, value_enum, default_value = "all")]
        only: PinSelection,
    },
    /// Show dashboard totals
    Stats,
    /// Merge pins from a JSON array of records
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
    /// Download the contact card (counts a download)
    Vcard {
        /// Pin code
        code: String,
        /// Directory to write into (defaults to the configured export directory)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Write the card to stdout
        #[arg(long)]
        stdout: bool,
    },
}

/// Handle a pin command
pub fn handle_pin_command(storage: &Storage, settings: &Settings, cmd: PinCommands) -> PinResult<()> {
    let service = PinService::new(storage);

    match cmd {
        PinCommands::Generate { count, length } => {
            let pins = service.generate(count, length.unwrap_or(settings.code_length))?;
            println!("Generated {} pin(s):", pins.len());
            for pin in pins {
                println!("  {}  {}", pin.code, settings.profile_url(&pin.code));
            }
        }
        PinCommands::Claim { code, uid } => {
            let record = service.claim(&code, &uid)?;
            println!("Pin {} claimed by {}", record.code, uid.trim());
        }
        PinCommands::Release { code } => {
            let record = service.release(&code)?;
            println!("Pin {} released", record.code);
        }
        PinCommands::Update {
            code,
            name,
            email,
            organization,
            phone,
            role,
            photo,
            file,
            info,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                organization,
                phone,
                role,
                photo,
                file,
                info,
            };
            let record = service.update_profile(&code, update)?;
            println!("Profile for pin {} updated", record.code);
        }
        PinCommands::View { code } => {
            service.record_view(&code)?;
            let record = service.get(&code)?;
            print!("{}", format_pin_details(&record, &settings.timestamp_formatter()));
            println!("Profile URL:   {}", settings.profile_url(&record.code));
        }
        PinCommands::Download { code } => {
            let downloads = service.record_download(&code)?;
            println!("Pin {} downloads: {}", code.trim(), downloads);
        }
        PinCommands::Show { code } => {
            let record = service.get(&code)?;
            print!("{}", format_pin_details(&record, &settings.timestamp_formatter()));
        }
        PinCommands::List { only } => {
            let records = service.list(PinFilter::from(only))?;
            print!("{}", format_pin_list(&records));
        }
        PinCommands::Stats => {
            print!("{}", format_stats(&service.stats()?));
        }
        PinCommands::Import { file } => {
            let summary = service.import_json(&file)?;
            println!(
                "Imported pins from {}: {} added, {} updated",
                file.display(),
                summary.added,
                summary.updated
            );
        }
        PinCommands::Vcard {
            code,
            output,
            stdout,
        } => {
            let record = service.get(&code)?;
            let url = settings.profile_url(&record.code);

            if stdout {
                export_vcard(&record, &url, &StdoutDelivery)?;
                service.record_download(&code)?;
            } else {
                let dir = output.unwrap_or_else(|| storage.paths().export_dir());
                let delivery = DirectoryDelivery::new(dir);
                let filename = export_vcard(&record, &url, &delivery)?;
                service.record_download(&code)?;
                println!("Contact card written to: {}", delivery.target_path(&filename)?.display());
            }
        }
    }

    Ok(())
}
