use clap::Parser;
use funweb::{FsAssets, Server};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Hand-rolled HTTP/1.1 server with a fixed set of fun GET endpoints.
#[derive(Debug, Parser)]
#[command(name = "funweb", version)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 9000)]
    port: u16,

    /// Directory holding root.html / index.html and the listed files.
    #[arg(long, default_value = "www")]
    site_dir: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!(host = %args.host, port = args.port, site_dir = %args.site_dir.display(), "listening");

    Server::builder()
        .listener(listener)
        .assets(FsAssets::new(args.site_dir))
        .build()
        .launch()
        .await;

    Ok(())
}
