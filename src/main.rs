use anyhow::Result;
use clap::Parser;
use clinic_client::{
    api::{HttpApiClient, ImageFile},
    app::{ClinicApp, Page, ResultPanel, TerminalShell},
    camera::StillImageDevice,
    cli::{CliArgs, Command},
    config::{self, LogFormat},
    session::SessionStorage,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn print_page(page: &Page) {
    if page.is_raw_preview_visible() {
        println!("Preview: [image, {} chars]", page.raw_preview().map_or(0, str::len));
    }
    if page.is_result_visible() {
        match page.result() {
            Some(ResultPanel::Rendered(view)) => print!("{view}"),
            Some(ResultPanel::Failed(message)) => println!("{message}"),
            None => {}
        }
    }
    if let Some(history) = page.history() {
        println!("History:");
        print!("{history}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load configuration first (before logging setup)
    let loaded = match args.config {
        Some(ref path) => config::load_from(path).await,
        None => config::load().await,
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(ref api_url) = args.api_url {
        config.api.base_url = api_url.clone();
    }

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logs.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }

    info!("Using API at {}", config.api.base_url);

    let session = SessionStorage::new(&config.session.storage_path, &config.session.token_key).await?;
    let mut app = ClinicApp::new(
        Arc::new(HttpApiClient::new(config.api.clone())),
        Arc::new(session),
        Arc::new(TerminalShell::new(config.ui.clone())),
        config.ui.date_format.clone(),
    );

    let succeeded = match args.command {
        Command::Login { username, password } => app.login(&username, &password).await.is_ok(),
        Command::Register { username, password } => {
            app.register(&username, &password).await.is_ok()
        }
        Command::History => app.load_history().await.is_ok(),
        Command::Predict { file } => {
            let file = ImageFile::from_path(&file).await?;
            matches!(app.handle_file_upload(vec![file]).await, Some(Ok(_)))
        }
        Command::Drop { files } => {
            let mut images = Vec::with_capacity(files.len());
            for path in &files {
                images.push(ImageFile::from_path(path).await?);
            }
            app.drag_over();
            !matches!(app.drop_files(images).await, Some(Err(_)))
        }
        Command::Capture { source } => {
            app = app.with_camera_device(Arc::new(StillImageDevice::new(source)));
            match app.start_camera().await {
                Ok(()) => app.capture_image().await.is_ok(),
                Err(_) => false,
            }
        }
    };

    print_page(app.page());

    if !succeeded {
        // The failure was already surfaced through the shell or the page.
        std::process::exit(1);
    }
    Ok(())
}
