use chargeslot_backend::backend_client::BackendClient;
use chargeslot_booking::{
    booking::{ResourceId, UserId},
    settings::SlotSettings,
    slot::{availability::available_slots, catalog::SlotCatalog},
};
use clap::Args;
use jiff::civil::Date;
use tracing::{info, warn};

use crate::{parsers, progress::spinner, tables};

#[derive(Args)]
pub struct SlotsArgs {
    /// The charging cabinet
    #[arg(short, long)]
    cabinet: ResourceId,

    /// The day to inspect (YYYY-MM-DD)
    #[arg(short, long, value_parser = parsers::parse_date)]
    date: Date,

    /// Warn when this user already booked the cabinet on that day
    #[arg(short, long)]
    user: Option<UserId>,
}

pub async fn run(
    args: SlotsArgs,
    client: &BackendClient,
    settings: &SlotSettings,
) -> anyhow::Result<()> {
    let bar = spinner(format!("Loading bookings of cabinet {}", args.cabinet));
    let bookings = client
        .list_bookings_intersecting_date(args.cabinet, args.date)
        .await;
    bar.finish_and_clear();
    let bookings = bookings?;

    let catalog = SlotCatalog::standard();
    let available = available_slots(&catalog, Some(args.date), &bookings, settings);
    let slots = catalog
        .iter()
        .map(|window| (window, available.contains(&window)));

    println!("{}", tables::slots_table(slots));

    if bookings.is_empty() {
        info!("No bookings on {}", args.date);
    } else {
        println!("{}", tables::bookings_table(&bookings, settings));
    }

    if let Some(user) = args.user
        && bookings.iter().any(|booking| {
            booking.belongs_to(user) && booking.starts_on(args.date, &settings.time_zone)
        })
    {
        warn!("User {user} already has a booking on {}", args.date);
    }

    Ok(())
}
