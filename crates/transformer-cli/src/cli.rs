//! Command line arguments

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use transformer_client::Transformations;

use crate::config::Settings;

#[derive(Parser, Debug)]
#[command(name = "transformer")]
#[command(about = "Upload, manage and deliver images through the Transformer service")]
#[command(version)]
pub struct Args {
    /// Settings file (TOML); defaults to ./transformer.toml when present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Shared API secret
    #[arg(long, global = true)]
    pub secret: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Delivery base URL
    #[arg(long, global = true)]
    pub delivery_url: Option<String>,

    /// API timeout in seconds
    #[arg(long, global = true)]
    pub api_timeout: Option<u64>,

    /// Delivery timeout in seconds
    #[arg(long, global = true)]
    pub delivery_timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true, env = "TRANSFORMER_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Apply flag overrides on top of loaded settings
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(secret) = &self.secret {
            settings.secret = secret.clone();
        }
        if let Some(url) = &self.api_url {
            settings.api_url = url.clone();
        }
        if let Some(url) = &self.delivery_url {
            settings.delivery_url = url.clone();
        }
        if let Some(timeout) = self.api_timeout {
            settings.api_timeout = timeout;
        }
        if let Some(timeout) = self.delivery_timeout {
            settings.delivery_timeout = timeout;
        }
        settings
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a new asset
    Add {
        /// Image file to upload
        file: PathBuf,
        /// Identifier to store the asset under
        identifier: String,
        /// Target folder
        folder: String,
    },
    /// Upload a new version of an asset
    Update {
        /// Image file to upload
        file: PathBuf,
        old_identifier: String,
        new_identifier: String,
    },
    /// Block a media
    Block { mediaid: i64 },
    /// Delete a media
    Delete { mediaid: i64 },
    /// Activate a media
    Activate { mediaid: i64 },
    /// List the versions of an identifier
    Versions { identifier: String },
    /// Print the delivery URL of an asset
    Url {
        #[command(flatten)]
        asset: AssetArgs,
    },
    /// Fetch an asset by folder and identifier
    Get {
        #[command(flatten)]
        asset: AssetArgs,
        /// Write the body to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch an asset by media id
    GetId {
        media_id: i64,
        /// Write the body to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Asset location and transformations on the delivery path
#[derive(ClapArgs, Debug, Clone)]
pub struct AssetArgs {
    pub stash: String,
    pub folder: String,
    pub identifier: String,

    /// Width in pixels
    #[arg(long)]
    pub width: Option<String>,

    /// Height in pixels
    #[arg(long)]
    pub height: Option<String>,

    /// Output format (png, jpg, gif)
    #[arg(long)]
    pub format: Option<String>,
}

impl AssetArgs {
    /// Raw transformations; invalid values are dropped when the path is built
    pub fn transformations(&self) -> Transformations {
        [
            ("width", &self.width),
            ("height", &self.height),
            ("format", &self.format),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_with_transformations() {
        let args = Args::try_parse_from([
            "transformer",
            "get",
            "cybex",
            "360images",
            "image01",
            "--width",
            "150",
            "--height",
            "100",
            "-o",
            "out.jpg",
        ])
        .unwrap();

        match args.command {
            Command::Get { asset, output } => {
                assert_eq!(asset.transformations().segment(), "w-150+h-100");
                assert_eq!(output, Some(PathBuf::from("out.jpg")));
            }
            other => panic!("Expected Get, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_transformation_values_are_kept_raw() {
        let args = Args::try_parse_from([
            "transformer",
            "url",
            "s",
            "f",
            "i",
            "--width",
            "abc",
            "--format",
            "webp",
        ])
        .unwrap();

        let Command::Url { asset } = args.command else {
            panic!("Expected Url");
        };
        let set = asset.transformations();
        assert_eq!(set.len(), 2);
        assert_eq!(set.segment(), "");
    }

    #[test]
    fn test_flags_override_settings() {
        let args = Args::try_parse_from([
            "transformer",
            "--secret",
            "flag-secret",
            "--api-timeout",
            "3",
            "block",
            "42",
        ])
        .unwrap();

        let settings = args.apply(Settings::default());
        assert_eq!(settings.secret, "flag-secret");
        assert_eq!(settings.api_timeout, 3);
        assert_eq!(settings.delivery_timeout, 30);
        assert!(matches!(args.command, Command::Block { mediaid: 42 }));
    }
}
