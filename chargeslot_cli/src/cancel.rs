use chargeslot_backend::backend_client::BackendClient;
use chargeslot_booking::booking::BookingId;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct CancelArgs {
    /// The booking to delete
    #[arg(short, long)]
    booking: BookingId,
}

pub async fn run(args: CancelArgs, client: &BackendClient) -> anyhow::Result<()> {
    let message = client.delete_booking(args.booking).await?;

    info!("{message}");

    Ok(())
}
