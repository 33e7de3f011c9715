//! # Transformer Client SDK
//!
//! A client SDK for the Transformer image transformation and delivery service.
//!
//! ## Features
//!
//! - **Asset lifecycle**: add, update, block, delete, activate and list
//!   versions through the multipart API
//! - **Delivery**: build and fetch image URLs with width, height and format
//!   transformations
//! - **No surprises**: one request per call, no retries, no caching
//!
//! ## Example
//!
//! ```rust,ignore
//! use transformer_client::{Config, ImageFormat, TransformerClient, Transformations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = TransformerClient::new(Config::new("your-secret"))?;
//!
//!     // Upload an image
//!     match client.add("./image01.jpg", "image01", "360images").await? {
//!         Ok(json) => println!("Uploaded: {}", json),
//!         Err(failure) => eprintln!("Request failed: {}", failure),
//!     }
//!
//!     // Build a delivery URL
//!     let transformations = Transformations::new().width(150).format(ImageFormat::Png);
//!     let url = client.get_url("cybex", "360images", "image01", &transformations);
//!     println!("{}", url);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod paths;
mod transform;
mod types;

pub use client::TransformerClient;
pub use config::{Config, DEFAULT_API_URL, DEFAULT_DELIVERY_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, ErrorDescriptor, Result};
pub use paths::{collapse_slashes, delivery_url};
pub use transform::{
    transformation_segment, validated_integer, ImageFormat, Transformation, Transformations,
};
pub use types::*;
