use quotient::AssetRef;
use quotient_demos::common::build_quotient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let q = build_quotient()?;

    let resolved = q.resolve(["btc", "EUR", "doge", "NOTACOIN"]).await?;
    let mut symbols: Vec<_> = resolved.into_iter().collect();
    symbols.sort_by(|a, b| a.0.cmp(&b.0));

    for (symbol, asset) in symbols {
        match asset {
            AssetRef::Fiat { .. } => println!("{symbol:<10} fiat"),
            AssetRef::Crypto {
                resolved_id: Some(id),
                ..
            } => println!("{symbol:<10} crypto -> {id}"),
            AssetRef::Crypto { .. } => println!("{symbol:<10} crypto (not in catalog)"),
        }
    }

    Ok(())
}
