//! Asset lifecycle example
//!
//! This example demonstrates:
//! - Uploading an image
//! - Listing its versions
//! - Blocking and re-activating it
//!
//! Run with: cargo run --example upload_asset -- ./image01.jpg

use transformer_client::{Config, TransformerClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("📦 Transformer - Asset Lifecycle Example\n");

    let file = std::env::args().nth(1).unwrap_or_else(|| "image01.jpg".to_string());
    let secret = std::env::var("TRANSFORMER_SECRET").unwrap_or_else(|_| "your-secret-here".to_string());
    let client = TransformerClient::new(Config::new(secret))?;

    // An unreadable file is a hard error, everything else comes back as JSON
    println!("📤 Uploading {}...", file);
    let uploaded = match client.add(&file, "image01", "360images").await? {
        Ok(json) => {
            println!("   ✅ {}", json);
            json
        }
        Err(failure) => {
            println!("   ⚠️  {}", failure);
            return Ok(());
        }
    };

    println!("\n📋 Versions of 'image01'...");
    match client.versions("image01").await? {
        Ok(json) => println!("   {}", serde_json::to_string_pretty(&json)?),
        Err(failure) => println!("   ⚠️  {}", failure),
    }

    // The response layout belongs to the service; look for a media id if present
    if let Some(mediaid) = uploaded.get("mediaid").and_then(|v| v.as_i64()) {
        println!("\n🚫 Blocking media {}...", mediaid);
        println!("   {:?}", client.block(mediaid).await?);

        println!("\n✅ Activating media {}...", mediaid);
        println!("   {:?}", client.activate(mediaid).await?);
    }

    Ok(())
}
