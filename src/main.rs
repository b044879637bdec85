use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use playlist_migrator::spotify::parse_callback;
use playlist_migrator::{AppError, Config, MigrationSession, PlaylistMigrator};

#[derive(Parser)]
#[command(name = "playlist-migrator")]
#[command(about = "Migrate a playlist from your music catalog to Spotify")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the playlists of a source catalog user
    ListPlaylists {
        /// Source catalog user ID
        #[arg(long)]
        user_id: String,
    },

    /// Migrate one playlist to Spotify
    Migrate {
        /// Source catalog user ID
        #[arg(long)]
        user_id: String,

        /// ID of the playlist to migrate (see list-playlists)
        #[arg(long)]
        playlist: String,

        /// URL Spotify redirected to after login; prompted for when omitted
        #[arg(long)]
        redirect_url: Option<String>,
    },

    /// Show setup guide
    Setup,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Commands::ListPlaylists { user_id } => {
            list_playlists(&user_id).await?;
        }
        Commands::Migrate {
            user_id,
            playlist,
            redirect_url,
        } => {
            migrate(&user_id, &playlist, redirect_url).await?;
        }
        Commands::Setup => {
            show_setup_guide();
        }
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        println!("{}", "Missing configuration:".red());
        for item in &missing {
            println!("   - {}", item);
        }
        println!(
            "\n{}",
            "Please copy .env.example to .env and fill in your credentials.".yellow()
        );
        std::process::exit(1);
    }

    Ok(config)
}

async fn list_playlists(user_id: &str) -> Result<()> {
    println!("{}", "Source Playlists".cyan().bold());
    println!("{}", "=".repeat(50));

    let config = load_config()?;
    let migrator =
        PlaylistMigrator::from_config(&config).context("Failed to initialize migrator")?;

    let session = match MigrationSession::new(user_id) {
        Ok(session) => session,
        Err(e) => fail(&e, user_id),
    };

    let playlists = match migrator.list_playlists(&session).await {
        Ok(playlists) => playlists,
        Err(e) => fail(&e, user_id),
    };

    if playlists.is_empty() {
        println!("{}", "No playlists found".yellow());
        return Ok(());
    }

    for (i, playlist) in playlists.iter().enumerate() {
        let count = playlist
            .track_count
            .map(|n| format!(" ({} tracks)", n))
            .unwrap_or_default();
        println!("{:2}. {}{}", i + 1, playlist.title.green(), count);
        println!("     id: {}", playlist.id.cyan());
    }

    println!("\n{}", format!("Total: {} playlists", playlists.len()).cyan());

    Ok(())
}

async fn migrate(user_id: &str, playlist_id: &str, redirect_url: Option<String>) -> Result<()> {
    let config = load_config()?;

    println!(
        "{}",
        format!("{} to Spotify Playlist Migrator", config.source_name)
            .cyan()
            .bold()
    );
    println!("{}", "=".repeat(50));

    let migrator = PlaylistMigrator::from_config(&config)
        .context("Failed to initialize migrator")?
        .with_progress();

    let mut session = match MigrationSession::new(user_id) {
        Ok(session) => session,
        Err(e) => fail(&e, user_id),
    };

    match migrator.select_playlist(&mut session, playlist_id).await {
        Ok(count) => println!("Extracted {} songs from the selected playlist", count),
        Err(e) => fail(&e, user_id),
    }

    let authorize_url = migrator
        .destination()
        .authorize_url()
        .context("Failed to build Spotify authorization URL")?;

    let redirect_url = match redirect_url {
        Some(url) => url,
        None => prompt_redirect_url(&authorize_url)?,
    };

    let code = match parse_callback(&redirect_url) {
        Ok(code) => code,
        Err(e) => fail(&e, user_id),
    };

    if let Err(e) = migrator.authenticate(&mut session, &code).await {
        fail(&e, user_id);
    }

    match migrator.migrate(&mut session).await {
        Ok(report) => {
            println!();
            println!("{}", report.summary());
            println!("\n{}", "Migration completed!".green());
        }
        Err(e) => fail(&e, user_id),
    }

    Ok(())
}

fn prompt_redirect_url(authorize_url: &str) -> Result<String> {
    println!("\nOpen this URL in your browser to log in with Spotify:");
    println!("{}\n", authorize_url);

    print!("Enter the URL you were redirected to: ");
    io::stdout().flush()?;

    let mut redirect_url = String::new();
    io::stdin().read_line(&mut redirect_url)?;

    Ok(redirect_url.trim().to_string())
}

/// Print a failed step and where to pick the migration back up, then exit.
fn fail(error: &AppError, user_id: &str) -> ! {
    println!("\n{}", error.to_string().red());

    let retry = match error {
        AppError::SourceFetch(_) => format!("playlist-migrator list-playlists --user-id {}", user_id),
        AppError::Authorization(_)
        | AppError::AuthExchange(_)
        | AppError::InvalidGrant(_)
        | AppError::ProfileFetch { .. }
        | AppError::PlaylistCreate { .. } => {
            "run migrate again to log in with Spotify again".to_string()
        }
        _ => "start over with playlist-migrator list-playlists".to_string(),
    };
    println!("{} {}", "Try again:".yellow(), retry);

    std::process::exit(1);
}

fn show_setup_guide() {
    println!("{}", "Playlist Migrator Setup Guide".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "1. Spotify API Setup".yellow());
    println!("   - Go to https://developer.spotify.com/dashboard/");
    println!("   - Create a new app");
    println!("   - Copy your Client ID and Client Secret");
    println!("   - Add 'http://127.0.0.1:8888/callback' as a redirect URI");

    println!("\n{}", "2. Source Catalog".yellow());
    println!("   - Point SOURCE_API_URL at the source catalog's JSON API");
    println!("   - Find your user ID (for YouTube Music, the channel ID)");

    println!("\n{}", "3. Configuration".yellow());
    println!("   - Create a .env file with:");
    println!("     SPOTIFY_CLIENT_ID=your_spotify_client_id");
    println!("     SPOTIFY_CLIENT_SECRET=your_spotify_client_secret");
    println!("     SPOTIFY_REDIRECT_URI=http://127.0.0.1:8888/callback");
    println!("     SOURCE_API_URL=http://localhost:8000");
    println!("     SOURCE_NAME=YouTube Music          (optional)");
    println!("     HTTP_TIMEOUT_SECS=10               (optional)");

    println!("\n{}", "4. Usage".yellow());
    println!("   - playlist-migrator list-playlists --user-id <id>");
    println!("   - playlist-migrator migrate --user-id <id> --playlist <playlist id>");

    println!("\n{}", "Ready to start migrating!".green());
}
