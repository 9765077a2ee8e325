use brew_cli::{render_store_detail, render_store_list, tracker_for, BrewApiClient, Session};
use brew_core::StoreHandle;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "brew-cli")]
#[command(about = "Find coffee stores nearby and upvote your favourites")]
struct Cli {
    /// Base URL of the brew server.
    #[arg(long, env = "BREW_API_URL", default_value = brew_cli::DEFAULT_API_URL)]
    api_url: String,

    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List coffee stores near you.
    Nearby {
        /// Your location as "lat,long"; without it the default location is used.
        #[arg(long, env = "BREW_LAT_LONG")]
        lat_long: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one store, persisting it on first visit.
    Store {
        id: String,
        /// Location whose nearby list the store is looked up in.
        #[arg(long, env = "BREW_LAT_LONG")]
        lat_long: Option<String>,
    },
    /// Add a vote to a persisted store.
    Upvote { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = BrewApiClient::new(&cli.api_url, cli.timeout_secs)?;
    let state = StoreHandle::default();
    let session = Session::new(api, state.clone());

    match cli.command {
        Some(Commands::Nearby { lat_long, limit }) => {
            let mut tracker = tracker_for(lat_long.as_deref(), state);
            let view = session.view_nearby(&mut tracker, limit).await?;
            if let Some(msg) = &view.location_error {
                eprintln!("Error: {msg}");
            }
            if view.stores.is_empty() {
                println!("no coffee stores found");
            } else {
                print!("{}", render_store_list(view.heading, &view.stores));
            }
        }
        Some(Commands::Store { id, lat_long }) => {
            session.refresh_stores(lat_long.as_deref(), None).await?;
            let store = session.view_store(&id).await?;
            print!("{}", render_store_detail(&store));
        }
        Some(Commands::Upvote { id }) => {
            let store = session.upvote(&id).await?;
            print!("{}", render_store_detail(&store));
        }
        None => {
            let stores = session.refresh_stores(None, None).await?;
            print!("{}", render_store_list("Popular stores", &stores));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nearby_with_location_and_limit() {
        let cli = Cli::try_parse_from([
            "brew-cli",
            "nearby",
            "--lat-long",
            "51.5,-0.13",
            "--limit",
            "10",
        ])
        .expect("expected valid cli args");

        assert!(matches!(
            cli.command,
            Some(Commands::Nearby {
                lat_long: Some(ref ll),
                limit: Some(10),
            }) if ll == "51.5,-0.13"
        ));
    }

    #[test]
    fn parses_upvote_command() {
        let cli = Cli::try_parse_from(["brew-cli", "upvote", "abc"])
            .expect("expected valid cli args");
        assert!(matches!(cli.command, Some(Commands::Upvote { ref id }) if id == "abc"));
    }

    #[test]
    fn store_requires_id() {
        assert!(Cli::try_parse_from(["brew-cli", "store"]).is_err());
    }

    #[test]
    fn api_url_flag_overrides_default() {
        let cli = Cli::try_parse_from([
            "brew-cli",
            "--api-url",
            "http://example.test",
            "upvote",
            "x",
        ])
        .expect("expected valid cli args");
        assert_eq!(cli.api_url, "http://example.test");
    }
}
