//! SHOWROOM live recorder
//!
//! This is the main library crate for the recorder. It watches a single
//! room's live status and captures each live session to a .ts file by
//! delegating the stream copy to ffmpeg.

pub mod api;
pub mod capture;
pub mod cli;
pub mod recorder;
pub mod utils;

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::RoomTarget;
use cli::Args;
use recorder::{MonitorConfig, RoomMonitor};
use utils::error::AppResult;

/// Run the recorder until a shutdown signal arrives.
pub async fn run(args: Args) -> AppResult<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showroom_recorder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting showroom-recorder v{}", env!("CARGO_PKG_VERSION"));

    // The only fatal error: an unparseable room reference
    let target = RoomTarget::parse(&args.room_url)?;

    let config = MonitorConfig {
        output_dir: args.output_dir,
        poll_interval: Duration::from_secs(args.interval),
        passthrough: args.debug,
    };

    RoomMonitor::new(target, config).run().await
}
