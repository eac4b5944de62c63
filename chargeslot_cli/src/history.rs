use chargeslot_backend::backend_client::BackendClient;
use chargeslot_booking::{
    booking::{UserId, history::booking_history},
    settings::SlotSettings,
};
use clap::Args;
use jiff::Timestamp;
use tracing::info;

use crate::{progress::spinner, tables};

#[derive(Args)]
pub struct HistoryArgs {
    /// The user whose bookings are listed
    #[arg(short, long)]
    user: UserId,
}

pub async fn run(
    args: HistoryArgs,
    client: &BackendClient,
    settings: &SlotSettings,
) -> anyhow::Result<()> {
    let bar = spinner(format!("Loading bookings of user {}", args.user));
    let bookings = client.list_bookings_by_user(args.user).await;
    bar.finish_and_clear();

    let history = booking_history(bookings?, Timestamp::now());

    if history.is_empty() {
        info!("No bookings in the last seven days");
    } else {
        println!("{}", tables::history_table(&history, settings));
    }

    Ok(())
}
