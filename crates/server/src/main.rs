use ainura_core::config;
use ainura_core::storage::{load_gallery, save_gallery};
use ainura_core::{ContentKind, Gallery};
use ainura_server::api::create_router;
use ainura_server::api::handlers::AppState;
use ainura_server::api::metrics;
use ainura_server::upstream::Upstream;
use clap::Parser;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ainura-server", about = "AiNura gallery service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Data directory holding images.json and videos.json
    #[arg(short, long, default_value = config::DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Upstream listing base URL. Falls back to AINURA_API_BASE_URL.
    #[arg(long)]
    upstream_url: Option<String>,

    /// Upstream refresh interval in seconds (0 = startup only)
    #[arg(long, default_value_t = config::DEFAULT_REFRESH_INTERVAL_SECS)]
    refresh_interval: u64,

    /// Snapshot interval in seconds (0 = disabled)
    #[arg(long, default_value_t = config::DEFAULT_SNAPSHOT_INTERVAL_SECS)]
    snapshot_interval: u64,

    /// Graceful shutdown timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_SHUTDOWN_TIMEOUT_SECS)]
    shutdown_timeout: u64,

    /// TLS certificate file path
    #[arg(long)]
    tls_cert: Option<String>,

    /// TLS private key file path
    #[arg(long)]
    tls_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ainura_server=info".parse()?)
                .add_directive("ainura_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    let data_path = Path::new(&args.data_dir);
    if data_path.exists() && !data_path.is_dir() {
        eprintln!(
            "Error: data_dir '{}' exists but is not a directory",
            args.data_dir
        );
        std::process::exit(1);
    }

    // Malformed fixtures are fatal; a missing directory is an empty gallery.
    let gallery = match load_gallery(data_path) {
        Ok(gallery) => gallery,
        Err(e) => {
            eprintln!("Error: could not load gallery from '{}': {}", args.data_dir, e);
            std::process::exit(1);
        }
    };

    let api_key = std::env::var("AINURA_API_KEY").ok().filter(|k| !k.is_empty());
    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::info!("No API key set, write routes are open (dev mode)");
    }

    let upstream_url = args
        .upstream_url
        .clone()
        .or_else(|| std::env::var("AINURA_API_BASE_URL").ok())
        .filter(|u| !u.is_empty());
    let upstream = upstream_url.as_deref().map(Upstream::new).transpose()?;

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let state = AppState {
        gallery: gallery.clone(),
        data_dir: args.data_dir.clone(),
        api_key,
        prometheus_handle,
        start_time: Instant::now(),
        upstream: upstream.as_ref().map(|u| u.base_url().to_string()),
    };

    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", args.port);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        data_dir = %args.data_dir,
        snapshot_interval_secs = args.snapshot_interval,
        refresh_interval_secs = args.refresh_interval,
        upstream = upstream.is_some(),
        tls = args.tls_cert.is_some(),
        images = gallery.len(ContentKind::Image),
        videos = gallery.len(ContentKind::Video),
        "ainura-server ready"
    );

    // Spawn gallery metrics background task
    let metrics_gallery = gallery.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(15));
        loop {
            interval.tick().await;
            metrics::update_gallery_metrics(&metrics_gallery);
        }
    });

    // Spawn upstream refresh task; the first tick fires immediately
    if let Some(upstream) = upstream {
        let refresh_gallery = gallery.clone();
        let refresh_interval = args.refresh_interval;
        tokio::spawn(async move {
            upstream.refresh(&refresh_gallery).await;
            if refresh_interval == 0 {
                return;
            }
            tracing::info!("Upstream refresh every {}s", refresh_interval);
            let mut interval = tokio::time::interval(Duration::from_secs(refresh_interval));
            interval.tick().await;
            loop {
                interval.tick().await;
                upstream.refresh(&refresh_gallery).await;
            }
        });
    }

    // Spawn auto-snapshot background task
    if args.snapshot_interval > 0 {
        let snap_gallery = gallery.clone();
        let snap_data_dir = args.data_dir.clone();
        let snap_interval = args.snapshot_interval;
        tracing::info!("Auto-snapshots enabled every {}s", snap_interval);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(snap_interval));
            interval.tick().await;
            loop {
                interval.tick().await;
                tracing::info!("Running periodic snapshot...");
                if let Err(e) = save_gallery(&snap_gallery, Path::new(&snap_data_dir)) {
                    tracing::error!("Periodic snapshot failed: {}", e);
                }
            }
        });
    }

    let shutdown_timeout = args.shutdown_timeout;
    match (args.tls_cert, args.tls_key) {
        (Some(cert), Some(key)) => {
            tracing::info!("TLS enabled");
            let tls_config =
                axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert, &key).await?;
            let handle = axum_server::Handle::new();
            let shutdown_handle = handle.clone();
            tokio::spawn(async move {
                wait_for_signal().await;
                shutdown_handle.graceful_shutdown(Some(Duration::from_secs(shutdown_timeout)));
            });
            axum_server::bind_rustls(addr.parse()?, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        (None, None) => {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app)
                .with_graceful_shutdown(wait_for_signal())
                .await?;
        }
        _ => {
            eprintln!("Error: Both --tls-cert and --tls-key must be provided together");
            std::process::exit(1);
        }
    }

    flush_and_shutdown(&gallery, &args.data_dir);

    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}

fn flush_and_shutdown(gallery: &Gallery, data_dir: &str) {
    tracing::info!("All requests drained, saving gallery...");
    match save_gallery(gallery, Path::new(data_dir)) {
        Ok(()) => tracing::info!(
            images = gallery.len(ContentKind::Image),
            videos = gallery.len(ContentKind::Video),
            "Saved gallery on shutdown"
        ),
        Err(e) => tracing::error!("Failed to save gallery on shutdown: {}", e),
    }
}
