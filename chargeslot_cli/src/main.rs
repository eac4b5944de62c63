use chargeslot_backend::backend_client::BackendClient;
use chargeslot_booking::settings::SlotSettings;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{
    book::BookArgs, cancel::CancelArgs, generate::GenerateSubcommands, history::HistoryArgs,
    slots::SlotsArgs,
};

mod book;
mod cancel;
mod generate;
mod history;
mod parsers;
mod progress;
mod slots;
mod tables;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the charging slots of a cabinet for one day
    Slots {
        #[command(flatten)]
        args: SlotsArgs,
    },
    /// Book a charging slot
    Book {
        #[command(flatten)]
        args: BookArgs,
    },
    /// Show the bookings of a user over the last seven days
    History {
        #[command(flatten)]
        args: HistoryArgs,
    },
    /// Delete a booking
    Cancel {
        #[command(flatten)]
        args: CancelArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Slots { args }) => {
            slots::run(args, &BackendClient::from_env()?, &SlotSettings::from_env()?).await?
        }
        Some(Commands::Book { args }) => {
            book::run(args, BackendClient::from_env()?, SlotSettings::from_env()?).await?
        }
        Some(Commands::History { args }) => {
            history::run(args, &BackendClient::from_env()?, &SlotSettings::from_env()?).await?
        }
        Some(Commands::Cancel { args }) => cancel::run(args, &BackendClient::from_env()?).await?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {
            // Handle no command provided
        }
    }

    Ok(())
}
