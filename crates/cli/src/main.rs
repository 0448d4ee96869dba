use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mavuno_core::{CountyInfo, RainfallEstimate};
use server::config::{api_key_from_env, AppConfig, API_KEY_VARS, CONFIG_FILE};
use server::{create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mavuno")]
#[command(about = "Crop yield prediction and farming advice for Kenyan counties", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,

    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default mavuno.toml in the current directory
    Init,
    /// Start the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the rainfall estimate for a county and year
    Rainfall { county: String, year: i32 },
    /// List counties with their base rainfall
    Counties,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => init_config(&cli.config).await,
        Some(Commands::Serve { port, config }) => {
            serve(config.as_deref().unwrap_or(cli.config.as_path()), port.or(cli.port)).await
        }
        Some(Commands::Rainfall { county, year }) => {
            print_rainfall(&county, year);
            Ok(())
        }
        Some(Commands::Counties) => {
            print_counties();
            Ok(())
        }
        None => serve(&cli.config, cli.port).await,
    }
}

async fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    AppConfig::default()
        .write(path)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!();
    println!("Created {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Set {} in your environment or a .env file", API_KEY_VARS[0]);
    println!("  2. Run 'mavuno serve' to start the API");

    Ok(())
}

async fn serve(config_path: &Path, port: Option<u16>) -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to load .env: {}", e);
        }
    }

    init_tracing();

    let mut config = AppConfig::read(config_path)
        .await
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let bind_address = config.bind_address();
    let port = config.server.port;
    let model = config.gemini.model.clone();

    let state = AppState::from_config(config, api_key_from_env())
        .context("Failed to configure Gemini client")?;
    let ai_status = if state.has_advisor() {
        model
    } else {
        format!("disabled (set {})", API_KEY_VARS[0])
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    println!();
    println!("MavunoVision");
    println!("════════════════════════════════════════");
    println!();
    println!("  API Server:  http://localhost:{}", port);
    println!("  Swagger UI:  http://localhost:{}/swagger-ui", port);
    println!("  AI model:    {}", ai_status);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_rainfall(county: &str, year: i32) {
    let estimate = RainfallEstimate::new(county, year);

    println!(
        "{} {}: {} mm (base {} mm, offset {:+} mm)",
        estimate.county,
        estimate.year,
        estimate.rainfall_mm,
        estimate.base_rainfall_mm,
        estimate.offset_mm
    );
    if !estimate.known_county {
        println!("  Unknown county, using the default base rainfall");
    }
}

fn print_counties() {
    let counties = CountyInfo::all();

    println!();
    println!("Counties ({}):", counties.len());
    for county in &counties {
        println!("  {:<20} {:>5} mm", county.name, county.base_rainfall_mm);
    }
    println!();
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mavuno=info,server=info,advisor=info,tower_http=info".into()),
        )
        .init();
}
