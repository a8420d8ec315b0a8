use quotient_demos::common::build_quotient;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,quotient=debug,quotient_coingecko=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let q = build_quotient()?;

    // Resolve, history, and spot each open their own spans.
    let _ = q.resolve(["BTC", "EUR"]).await?;
    let _ = q.get_ratio_history("BTC", "EUR", 7).await?;
    let _ = q.get_spot_price("ETH", "BTC").await?;

    Ok(())
}
