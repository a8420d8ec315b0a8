use quotient_demos::common::{build_quotient, fmt_ts};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let q = build_quotient()?;

    // Windows of 90 days and more are thinned to 3-hour spacing before alignment.
    for days in [30, 90, 365] {
        let s = q.get_ratio_history("ETH", "USD", days).await?;
        match s.time_range() {
            Some((start, end)) => println!(
                "{days:>3} days: {:>5} points from {} to {}",
                s.len(),
                fmt_ts(start),
                fmt_ts(end)
            ),
            None => println!("{days:>3} days: no data"),
        }
    }

    Ok(())
}
