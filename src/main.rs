use clap::Parser;
use flowdoc::{cli, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    cli::run(args).await
}
