use anyhow::{bail, Context};
use futures::TryStreamExt;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use funimationlater::{CatalogClient, Config, HttpTransport, Show, DEFAULT_LIMIT};

const USAGE: &str = "usage: funimationlater <command>

commands:
  queue                        shows in your queue
  history                      your viewing history
  shows [limit] [offset]       one page of the show list
  simulcasts [limit] [offset]  one page of current simulcasts
  search <query>               search the catalog
  catalog                      every show in the catalog

credentials are read from FUNIMATION_USERNAME and FUNIMATION_PASSWORD";

/// Print a show's raw mapping as one JSON line
fn print_show(show: &Show) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(show.raw())?);
    Ok(())
}

fn page_args(args: &[String]) -> anyhow::Result<(u32, u32)> {
    let limit = match args.first() {
        Some(v) => v.parse().with_context(|| format!("invalid limit: {}", v))?,
        None => DEFAULT_LIMIT,
    };
    let offset = match args.get(1) {
        Some(v) => v.parse().with_context(|| format!("invalid offset: {}", v))?,
        None => 0,
    };
    Ok((limit, offset))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays one show per line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "funimationlater=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = Config::from_env();
    tracing::debug!("Using endpoint {}", config.base_url());

    let transport = Arc::new(HttpTransport::new(&config)?);
    let client = CatalogClient::connect(
        transport,
        config.username.as_deref(),
        config.password.as_deref(),
    )
    .await?;

    if !client.is_logged_in() && command != "search" {
        tracing::warn!("FUNIMATION_USERNAME/FUNIMATION_PASSWORD not set; listing will be refused");
    }

    let shows = match command.as_str() {
        "queue" => client.get_my_queue().await?,
        "history" => client.get_history().await?,
        "shows" => {
            let (limit, offset) = page_args(&args[1..])?;
            client.get_all_shows(limit, offset).await?
        }
        "simulcasts" => {
            let (limit, offset) = page_args(&args[1..])?;
            client.get_simulcasts(limit, offset).await?
        }
        "search" => {
            let query = args[1..].join(" ");
            if query.is_empty() {
                bail!("search needs a query");
            }
            client.search(&query).await?.unwrap_or_default()
        }
        "catalog" => {
            let mut count = 0usize;
            let mut stream = Box::pin(client.all_shows());
            while let Some(show) = stream.try_next().await? {
                print_show(&show)?;
                count += 1;
            }
            tracing::info!("Listed {} shows", count);
            return Ok(());
        }
        other => {
            eprintln!("unknown command: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
    };

    for show in &shows {
        print_show(show)?;
    }
    tracing::info!("Listed {} shows", shows.len());

    Ok(())
}
