//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

/// Record a SHOWROOM room's live stream whenever it goes live.
///
/// Polls the room's live status and, for each live session, hands the
/// stream to ffmpeg to copy into a .ts file.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Room URL, e.g. https://www.showroom-live.com/r/<room_key>
    pub room_url: String,

    /// Show ffmpeg's own console output
    #[arg(long)]
    pub debug: bool,

    /// Directory recordings are written to
    #[arg(long, default_value = "recordings")]
    pub output_dir: PathBuf,

    /// Seconds between live-status checks
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_room_url_is_required() {
        assert!(Args::try_parse_from(["showroom-recorder"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args =
            Args::try_parse_from(["showroom-recorder", "https://host/r/abc123"]).unwrap();
        assert!(!args.debug);
        assert_eq!(args.output_dir, PathBuf::from("recordings"));
        assert_eq!(args.interval, 3);
    }
}
