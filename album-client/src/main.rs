//! albums - command-line client for the album catalog
//!
//! Every mutating command prints the refreshed list afterwards.

use std::io::{self, BufRead, Write};

use album_client::{AlbumsClient, CatalogSession, DEFAULT_API_URL};
use album_common::Album;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Command-line arguments for albums
#[derive(Parser, Debug)]
#[command(name = "albums")]
#[command(about = "Command-line client for the album catalog")]
#[command(version)]
struct Cli {
    /// Base URL of the album API
    #[arg(long, env = "ALBUMS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all albums
    List,
    /// Show one album
    Show { id: Uuid },
    /// Add an album
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        year: Option<String>,
    },
    /// Edit an album; omitted fields keep their current values
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        year: Option<String>,
    },
    /// Delete an album
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check that the service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let client = AlbumsClient::new(&cli.api_url).context("Failed to build HTTP client")?;
    let mut session = CatalogSession::new(client);

    match cli.command {
        Command::List => {
            session.refresh().await?;
            print_albums(session.albums());
        }
        Command::Show { id } => {
            let album = session.client().get_album(id).await?;
            print_album(&album);
        }
        Command::Add {
            title,
            artist,
            year,
        } => {
            session.form.title = title;
            session.form.artist = artist;
            session.form.set_year(year.as_deref().unwrap_or_default());

            let album = session.submit().await?;
            println!("Added {}", album.id);
            print_albums(session.albums());
        }
        Command::Edit {
            id,
            title,
            artist,
            year,
        } => {
            session.begin_edit(id).await?;
            if let Some(title) = title {
                session.form.title = title;
            }
            if let Some(artist) = artist {
                session.form.artist = artist;
            }
            if let Some(year) = year {
                session.form.set_year(&year);
            }

            let album = session.submit().await?;
            println!("Updated {}", album.id);
            print_albums(session.albums());
        }
        Command::Delete { id, yes } => {
            let album = session.client().get_album(id).await?;
            if !yes && !confirm(&format!("Delete \"{}\" by {}?", album.title, album.artist))? {
                println!("Cancelled");
                return Ok(());
            }

            session.delete(id).await?;
            println!("Deleted {}", id);
            print_albums(session.albums());
        }
        Command::Health => {
            let health = session.client().health().await?;
            println!("{} {} ({})", health.module, health.version, health.status);
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but y/yes is no
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_albums(albums: &[Album]) {
    if albums.is_empty() {
        println!("No albums yet.");
        return;
    }
    for album in albums {
        print_album(album);
    }
}

fn print_album(album: &Album) {
    match album.year {
        Some(year) => println!("{}  {} - {} ({})", album.id, album.title, album.artist, year),
        None => println!("{}  {} - {}", album.id, album.title, album.artist),
    }
}
