use anyhow::{Context, Result};
use clap::Parser;
use inspiro::{browser::Browser, config::Args, logging, BrowsingSession, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from(&args);

    logging::init_logging(config.log_dir.as_deref(), args.once)?;

    if args.once {
        return run_once(&config, args.save).await;
    }

    let mut browser = Browser::new(&config)?;
    browser.run().await?;

    Ok(())
}

async fn run_once(config: &Config, save: bool) -> Result<()> {
    let mut session = BrowsingSession::new(config).context("failed to build HTTP client")?;
    let record = session.step_forward().await?.clone();
    println!("{}", serde_json::to_string_pretty(&record)?);

    if save {
        if let Some(path) = session.save_current().await? {
            eprintln!("Saved to {}", path.display());
        }
    }

    Ok(())
}
