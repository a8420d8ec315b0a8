use quotient_demos::common::{build_quotient, fmt_ts};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let q = build_quotient()?;

    println!("Fetching 30 days of BTC priced in EUR...");
    let series = q.get_ratio_history("BTC", "EUR", 30).await?;

    if series.is_empty() {
        println!("No data available right now.");
        return Ok(());
    }

    println!("{} points", series.len());
    for p in series.iter().step_by(24) {
        println!("{}  {:>12.2}", fmt_ts(p.time), p.value);
    }
    if let Some(last) = series.last() {
        println!("latest {}  {:.2}", fmt_ts(last.time), last.value);
    }

    Ok(())
}
