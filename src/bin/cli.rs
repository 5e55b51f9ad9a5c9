// src/bin/cli.rs
use clap::Parser;
use inbox_scrape::{cli, log, progress::ConsoleProgress};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = cli::Args::parse();
    log::init(args.verbose, args.log_file.as_deref())?;

    let session = cli::prepare(&args).await?;
    match session.run(&mut ConsoleProgress::new()).await {
        Ok(summary) => {
            println!("{}", summary.path.display());
            Ok(())
        }
        // Already reported on the status line
        Err(_) => std::process::exit(1),
    }
}
