use chargeslot_backend::backend_client::BackendClient;
use chargeslot_booking::{
    booking::{ResourceId, UserId},
    screen::{
        booking_screen::{Notice, ScreenPhase},
        controller::{BookingController, SubmitOutcome},
    },
    settings::SlotSettings,
    slot::catalog::SlotCatalog,
};
use clap::Args;
use jiff::civil::Date;
use tracing::info;

use crate::{parsers, progress::spinner, tables};

#[derive(Args)]
pub struct BookArgs {
    /// The charging cabinet
    #[arg(short, long)]
    cabinet: ResourceId,

    /// The booking day (YYYY-MM-DD), today or later
    #[arg(short, long, value_parser = parsers::parse_date)]
    date: Date,

    /// The user making the booking
    #[arg(short, long)]
    user: UserId,

    /// The slot label, e.g. "09:00 - 12:00"
    #[arg(short, long)]
    slot: String,
}

pub async fn run(args: BookArgs, client: BackendClient, settings: SlotSettings) -> anyhow::Result<()> {
    let today = settings.today();
    let controller = BookingController::new(
        client,
        args.cabinet,
        args.user,
        SlotCatalog::standard(),
        settings,
    );

    let bar = spinner(format!("Loading bookings of {}", args.date));
    let loaded = controller.select_date(args.date, today).await;
    bar.finish_and_clear();
    loaded?;

    let screen = controller.screen();
    if screen.phase() == ScreenPhase::LoadFailed {
        let message = match screen.notice() {
            Some(Notice::Error(message)) => message.clone(),
            _ => String::from("Could not load bookings"),
        };
        anyhow::bail!(message);
    }

    controller.choose_slot(&args.slot)?;

    let bar = spinner(format!("Booking {} on {}", args.slot, args.date));
    let outcome = controller.submit().await;
    bar.finish_and_clear();

    match outcome? {
        SubmitOutcome::Confirmed(booking) => {
            info!("Booking confirmed");
            let screen = controller.screen();
            println!(
                "{}",
                tables::bookings_table(std::slice::from_ref(&booking), screen.settings())
            );
            Ok(())
        }
        SubmitOutcome::Failed(message) => anyhow::bail!("Booking failed: {message}"),
    }
}
