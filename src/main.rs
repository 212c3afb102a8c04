use anyhow::Context;
use clap::{Parser, Subcommand};
use cinedeck::ArcStr;
use cinedeck::api::catalog::{Category, ItemId, MediaKind};
use cinedeck::app::state::Route;
use cinedeck::app::{App, Command};
use cinedeck::utils::install_panic_hook;

#[derive(Parser)]
#[command(name = "cinedeck")]
#[command(about = "Browse a movie and TV catalog from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser (default)
    Browse {
        /// Route to start at, e.g. "/tv" or "/search?keyword=alien"
        #[arg(default_value = "/")]
        route: String,
    },
    /// Print one page of a category
    List {
        /// One of now-playing, top-rated-movies, upcoming, airing-today,
        /// popular-tvs, top-rated-tvs, search-movies, search-tvs
        category: String,
        /// Keyword for the search categories
        #[arg(short, long)]
        keyword: Option<String>,
        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Search movies and TV shows
    Search {
        #[arg(required = true)]
        keyword: String,
    },
    /// Print the detail record of a movie or a TV show
    Detail {
        /// "movie" or "tv"
        kind: String,
        id: String,
    },
    /// Print what the browser shows at a route
    Open {
        #[arg(required = true)]
        route: String,
    },
}

impl Commands {
    fn into_command(self) -> anyhow::Result<Command> {
        Ok(match self {
            Commands::Browse { route } => Command::Browse {
                route: Route::parse(&route)?,
            },
            Commands::List {
                category,
                keyword,
                page,
            } => Command::List {
                category: category.parse::<Category>()?,
                keyword: keyword.map(ArcStr::from),
                page,
            },
            Commands::Search { keyword } => Command::Search {
                keyword: ArcStr::from(keyword),
            },
            Commands::Detail { kind, id } => Command::Detail {
                kind: kind.parse::<MediaKind>()?,
                id: ItemId::normalize(&id).with_context(|| format!("Invalid id: {}", id))?,
            },
            Commands::Open { route } => Command::Open {
                route: Route::parse(&route)?,
            },
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    install_panic_hook()?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or(Commands::Browse {
            route: "/".to_string(),
        })
        .into_command()?;

    let app = App::build().await?;
    match command {
        Command::Browse { route } => {
            let (_ui, handle) = app.spawn(route).await?;
            handle.await.context("Interactive session crashed")?;
        }
        command => app.resolve(command).await?,
    }

    Ok(())
}
