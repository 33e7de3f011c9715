//! Subcommand execution

use std::path::Path;

use anyhow::Context;
use tracing::info;
use transformer_client::{ApiResult, DeliveryResult, TransformerClient};

use crate::cli::Command;

/// Run one subcommand against the client.
///
/// Returns whether the upstream call succeeded; hard failures (unreadable
/// files, unwritable output) are errors.
pub async fn run(client: &TransformerClient, command: Command) -> anyhow::Result<bool> {
    let success = match command {
        Command::Add {
            file,
            identifier,
            folder,
        } => report_api(client.add(&file, &identifier, &folder).await?)?,
        Command::Update {
            file,
            old_identifier,
            new_identifier,
        } => report_api(client.update(&file, &old_identifier, &new_identifier).await?)?,
        Command::Block { mediaid } => report_api(client.block(mediaid).await?)?,
        Command::Delete { mediaid } => report_api(client.delete(mediaid).await?)?,
        Command::Activate { mediaid } => report_api(client.activate(mediaid).await?)?,
        Command::Versions { identifier } => report_api(client.versions(&identifier).await?)?,
        Command::Url { asset } => {
            let url = client.get_url(
                &asset.stash,
                &asset.folder,
                &asset.identifier,
                &asset.transformations(),
            );
            println!("{}", url);
            true
        }
        Command::Get { asset, output } => {
            let result = client
                .get(
                    &asset.stash,
                    &asset.folder,
                    &asset.identifier,
                    &asset.transformations(),
                )
                .await;
            report_delivery(result, output.as_deref()).await?
        }
        Command::GetId { media_id, output } => {
            report_delivery(client.get_by_id(media_id).await, output.as_deref()).await?
        }
    };

    Ok(success)
}

fn report_api(result: ApiResult) -> anyhow::Result<bool> {
    match result {
        Ok(json) => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(true)
        }
        Err(failure) => {
            eprintln!("Request failed: {}", failure);
            Ok(false)
        }
    }
}

async fn report_delivery(result: DeliveryResult, output: Option<&Path>) -> anyhow::Result<bool> {
    let response = match result {
        Ok(response) => response,
        Err(failure) => {
            eprintln!("Request failed: {}", failure);
            return Ok(false);
        }
    };

    println!(
        "{} {} ({} bytes)",
        response.status,
        response.content_type().unwrap_or("unknown content type"),
        response.content_length()
    );

    if let Some(path) = output {
        tokio::fs::write(path, &response.body)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} bytes to {}", response.body.len(), path.display());
    }

    Ok(response.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AssetArgs;
    use transformer_client::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_writes_body_to_output() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/360images/image01/w-64"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GIF89a".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let client =
            TransformerClient::new(Config::new("k").with_delivery_url(server.uri())).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("image01.gif");

        let command = Command::Get {
            asset: AssetArgs {
                stash: "cybex".to_string(),
                folder: "360images".to_string(),
                identifier: "image01".to_string(),
                width: Some("64".to_string()),
                height: None,
                format: None,
            },
            output: Some(output.clone()),
        };

        assert!(run(&client, command).await.unwrap());
        assert_eq!(std::fs::read(&output).unwrap(), b"GIF89a");
    }

    #[tokio::test]
    async fn test_api_failure_reports_unsuccessful() {
        let config = Config::new("k").with_api_url("http://127.0.0.1:1/api/v1/");
        let client = TransformerClient::new(config).unwrap();

        assert!(!run(&client, Command::Block { mediaid: 1 }).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_with_missing_file_is_an_error() {
        let client = TransformerClient::new(Config::new("k")).unwrap();
        let command = Command::Add {
            file: "/no/such/file.jpg".into(),
            identifier: "image01".to_string(),
            folder: "360images".to_string(),
        };

        assert!(run(&client, command).await.is_err());
    }
}
