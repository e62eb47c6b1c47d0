//! Icon Gallery - browse, search and serve a library of SVG icons
//!
//! Main entry point: the HTTP server and the terminal gallery.

mod browse;
mod cli;
mod remote;
mod server;

use anyhow::{Context, Result};
use app_core::{
    AppConfig, CategorySelection, Command, GalleryController, GalleryLocation, GallerySource,
    LocalSource,
};
use app_fs::DefaultFileOperations;
use clap::Parser;
use cli::{BrowseArgs, Cli, Commands, IconArgs, SourceArgs};
use remote::RemoteSource;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_default(),
    };

    // Initialize logging and panic hook first
    app_log::init(config.log.retention_days)?;
    tracing::info!("Icon Gallery {} starting...", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(cli.command, config))
}

async fn run(command: Commands, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve(args) => {
            if let Some(root) = args.root {
                config.store.root = root;
            }
            if let Some(bind) = args.bind {
                config.server.bind = bind;
            }
            server::serve(config.store.open_store(), &config.server.bind).await
        }
        Commands::Browse(args) => browse(args, &config).await,
        Commands::Show(args) => show(args, &config).await,
        Commands::Copy(args) => {
            let mut gallery = open_gallery(&args.source, &config, GalleryLocation::default());
            let icon = find_icon(&gallery, &args).await?;
            let result = gallery.copy(&icon).await;
            print_notification(&gallery);
            result?;
            Ok(())
        }
        Commands::Download(args) => {
            let download_dir = args.out.unwrap_or_else(|| config.client.download_dir());
            let mut gallery = open_gallery(&args.icon.source, &config, GalleryLocation::default())
                .with_download_dir(download_dir);
            let icon = find_icon(&gallery, &args.icon).await?;
            let result = gallery.download(&icon).await;
            print_notification(&gallery);
            result?;
            Ok(())
        }
    }
}

/// Build a controller over the local store, or over a server with `--server`
fn open_gallery(
    source: &SourceArgs,
    config: &AppConfig,
    location: GalleryLocation,
) -> GalleryController<Box<dyn GallerySource>> {
    let source: Box<dyn GallerySource> = match (&source.server, &source.root) {
        (Some(url), _) => {
            tracing::info!("Reading gallery from {}", url);
            Box::new(RemoteSource::new(url))
        }
        (None, root) => {
            let mut store = config.store.clone();
            if let Some(root) = root {
                store.root = root.clone();
            }
            tracing::info!("Reading icon store at {}", store.root.display());
            Box::new(LocalSource::new(store.open_store()))
        }
    };

    GalleryController::new(source, Arc::new(DefaultFileOperations::new()), location)
        .with_download_dir(config.client.download_dir())
        .with_notification_duration(config.client.notification_duration())
}

async fn find_icon(
    gallery: &GalleryController<Box<dyn GallerySource>>,
    args: &IconArgs,
) -> Result<app_fs::IconRecord> {
    gallery
        .find_icon(&args.icon.category, &args.icon.name)
        .await
        .with_context(|| format!("Icon not found: {}/{}", args.icon.category, args.icon.name))
}

async fn browse(args: BrowseArgs, config: &AppConfig) -> Result<()> {
    let location = GalleryLocation::new(CategorySelection::from_param(args.category.as_deref()));
    let mut gallery = open_gallery(&args.source, config, location);

    gallery.load().await;
    if let Some(query) = args.query {
        gallery.dispatch(Command::SetQuery(query)).await;
    }
    gallery.dispatch(Command::SetSort(args.sort)).await;

    print!("{}", browse::render_gallery(gallery.state()));
    Ok(())
}

async fn show(args: IconArgs, config: &AppConfig) -> Result<()> {
    let location =
        GalleryLocation::new(CategorySelection::Category(args.icon.category.clone()));
    let mut gallery = open_gallery(&args.source, config, location);
    gallery.load().await;

    let icon = find_icon(&gallery, &args).await?;
    gallery.dispatch(Command::SelectIcon(icon)).await;

    if let Some(detail) = gallery.state().detail() {
        print!("{}", browse::render_detail(detail, gallery.state().metadata()));
    }
    Ok(())
}

fn print_notification(gallery: &GalleryController<Box<dyn GallerySource>>) {
    if let Some(notification) = gallery.state().notification(Instant::now()) {
        let line = browse::render_notification(notification);
        if notification.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
