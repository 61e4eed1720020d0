use clap::Parser;
use showroom_recorder::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    showroom_recorder::run(args).await?;
    Ok(())
}
