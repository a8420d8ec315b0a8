use quotient_demos::common::build_quotient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let q = build_quotient()?;

    for (base, quote) in [("BTC", "USD"), ("ETH", "BTC"), ("EUR", "JPY"), ("SOL", "GBP")] {
        match q.get_spot_price(base, quote).await? {
            Some(px) => println!("1 {base} = {px:.6} {quote}"),
            None => println!("{base}/{quote}: unavailable"),
        }
    }

    Ok(())
}
