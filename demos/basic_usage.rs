//! Basic usage example for the Transformer delivery service
//!
//! This example demonstrates:
//! - Building delivery URLs with transformations
//! - Fetching an image by folder and identifier
//! - Fetching an image by media id
//!
//! Run with: cargo run --example basic_usage

use transformer_client::{Config, ImageFormat, TransformerClient, Transformations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🖼️  Transformer - Basic Usage Example\n");

    // Create the client
    let secret = std::env::var("TRANSFORMER_SECRET").unwrap_or_else(|_| "your-secret-here".to_string());
    let client = TransformerClient::new(Config::new(secret))?;

    // ==================== URL Building ====================

    let original = Transformations::new();
    let thumbnail = Transformations::new()
        .width(150)
        .height(100)
        .format(ImageFormat::Png);

    println!("🔗 Original:  {}", client.get_url("cybex", "360images", "image01", &original));
    println!("🔗 Thumbnail: {}", client.get_url("cybex", "360images", "image01", &thumbnail));

    // Loosely typed input: invalid entries are dropped
    let from_query: Transformations = serde_json::from_str(r#"{"width": "300", "format": "tiff"}"#)?;
    println!("🔗 From query: {}", client.get_url("cybex", "360images", "image01", &from_query));

    // ==================== Fetching ====================

    println!("\n📥 Fetching thumbnail...");
    match client.get("cybex", "360images", "image01", &thumbnail).await {
        Ok(response) => println!(
            "   ✅ {} {} ({} bytes)",
            response.status,
            response.content_type().unwrap_or("-"),
            response.body.len()
        ),
        Err(failure) => println!("   ⚠️  {}", failure),
    }

    println!("\n📥 Fetching media 1...");
    match client.get_by_id(1).await {
        Ok(response) => println!("   ✅ {} ({} bytes)", response.status, response.body.len()),
        Err(failure) => println!("   ⚠️  {}", failure),
    }

    Ok(())
}
