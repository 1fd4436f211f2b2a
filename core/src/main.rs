use anyhow::Context;
use fetch_core::{FetchConfig, JsonFetcher, StdoutSink};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let fetcher = JsonFetcher::new(FetchConfig::default());
    let transport = fetcher.http_transport().context("failed to build HTTP client")?;

    fetcher
        .fetch_into(&transport, &mut StdoutSink)
        .await
        .with_context(|| format!("failed to fetch {}", fetcher.config().url))?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
