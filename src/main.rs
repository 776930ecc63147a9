use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use halftoner::api;
use halftoner::assets::AssetLoader;
use halftoner::models::{self, AppConfig, SeparationParams};
use halftoner::rendering::tile_file_name;
use halftoner::server;
use halftoner::services::SeparationService;

#[derive(Parser)]
#[command(name = "halftoner")]
#[command(about = "Halftone color separation and print tiling for large-format prints")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Separate a PNG into halftone layers and printable tiles
    Separate {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Also write preview.png
        #[arg(long)]
        preview: bool,

        /// Draw tile outlines on the preview
        #[arg(long)]
        chops: bool,

        #[command(flatten)]
        params: SeparationParams,
    },
    /// Write the embedded config.yaml to CONFIG_FILE or ./config.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Halftoner API",
        description = "Halftone color separation and print tiling",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_separate,
        api::handle_manifest,
        api::handle_halftone_svg,
        api::handle_tile_svg,
        api::handle_preview,
    ),
    components(schemas(
        api::ErrorResponse,
        models::SeparationManifest,
        models::LayerSummary,
        models::TileSummary,
        models::ShapeKind,
    )),
    tags(
        (name = "Separation", description = "Halftone separation and tile export")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Separate {
            input,
            output,
            preview,
            chops,
            params,
        }) => run_separate_command(&input, &output, preview, chops, &params),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Separate a PNG file and write SVGs, tiles and manifest (no server needed)
fn run_separate_command(
    input: &Path,
    output: &Path,
    preview: bool,
    chops: bool,
    params: &SeparationParams,
) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftoner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let asset_loader = AssetLoader::from_env();
    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let service = SeparationService::new(config);

    let image = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let stored = service.separate_blocking(&image, params)?;

    let tiles_dir = output.join("chopped-svg");
    std::fs::create_dir_all(&tiles_dir)?;

    std::fs::write(output.join("halftone.svg"), stored.halftone_svg(false))?;

    let mut tile_files = 0;
    for layer in &stored.separation.layers {
        for tile in &stored.tiles {
            let svg = stored.tile_svg(&layer.id, tile.column, tile.row)?;
            std::fs::write(
                tiles_dir.join(tile_file_name(&layer.id, tile.column, tile.row)),
                svg,
            )?;
            tile_files += 1;
        }
    }

    std::fs::write(
        output.join("manifest.json"),
        serde_json::to_string_pretty(&stored.manifest)?,
    )?;

    if preview || chops {
        let png_bytes = service.render_preview_blocking(&stored, chops)?;
        std::fs::write(output.join("preview.png"), &png_bytes)?;
    }

    let m = &stored.manifest;
    println!(
        "Separated {} ({}x{} px) into {} layers, {}x{} tiles",
        input.display(),
        m.width,
        m.height,
        m.layers.len(),
        m.columns,
        m.rows
    );
    println!("Wrote {} tile files to {}", tile_files, tiles_dir.display());

    Ok(())
}

/// Write the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let loader = AssetLoader::from_env();
    let (path, written) = loader.init(force)?;

    if written {
        println!("Wrote {}", path.display());
    } else {
        println!(
            "Skipped existing {} (use --force to overwrite)",
            path.display()
        );
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Halftoner v{VERSION}");
    println!("Halftone color separation and print tiling\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    println!("\nConfig:  {}", loader.config_source());

    println!("\nCommands:");
    println!("  halftoner serve      Start the HTTP server");
    println!("  halftoner separate   Separate a PNG into halftone tiles");
    println!("  halftoner init       Extract the embedded config.yaml");
    println!("\nRun 'halftoner --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftoner=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = %asset_loader.config_source(), "Config source");

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Halftoner server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
