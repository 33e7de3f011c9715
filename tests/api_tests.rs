use rstest::rstest;
use serde_json::{json, Value};
use transformer_client::{
    delivery_url, transformation_segment, ClientError, Config, TransformerClient, Transformations,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn set(entries: Value) -> Transformations {
    serde_json::from_value(entries).unwrap()
}

#[rstest]
#[case(json!({"width": 150, "height": 100}), "w-150+h-100")]
#[case(json!({"height": 100, "width": 150}), "h-100+w-150")]
#[case(json!({"width": 150, "height": 100, "format": "png"}), "w-150+h-100+f-png")]
#[case(json!({"format": "jpg", "width": "80"}), "f-jpg+w-80")]
#[case(json!({"width": "abc"}), "")]
#[case(json!({"width": ""}), "")]
#[case(json!({"format": "webp"}), "")]
#[case(json!({"format": "PNG"}), "")]
#[case(json!({"rotate": 90, "height": 20}), "h-20")]
#[case(json!({}), "")]
fn test_transformation_segment(#[case] entries: Value, #[case] expected: &str) {
    assert_eq!(transformation_segment(&set(entries)), expected);
}

#[rstest]
#[case("https://images.goodbaby.eu")]
#[case("https://images.goodbaby.eu/")]
#[case("https://images.goodbaby.eu//")]
#[case("https://images.goodbaby.eu////")]
fn test_delivery_url_without_transformations(#[case] base: &str) {
    let url = delivery_url(base, "cybex", "360images", "image01", &Transformations::new());
    assert_eq!(url, "https://images.goodbaby.eu/360images/image01");
}

#[test]
fn test_delivery_url_with_transformations() {
    let url = delivery_url(
        "https://images.goodbaby.eu/",
        "cybex",
        "360images",
        "image01",
        &set(json!({"width": 150, "height": 100})),
    );
    assert!(url.ends_with("/360images/image01/w-150+h-100"));
    assert!(!url["https://".len()..].contains("//"));
}

#[rstest]
#[case("https://transformer.goodbaby.eu/api/v1/", "https://images.goodbaby.eu/")]
#[case("http://localhost/", "http://localhost/")]
#[case("not a url", "also not a url")]
#[case("", "")]
fn test_empty_secret_always_rejected(#[case] api_url: &str, #[case] delivery: &str) {
    let config = Config::new("")
        .with_api_url(api_url)
        .with_delivery_url(delivery);

    let err = TransformerClient::new(config).unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

#[rstest]
#[case(400)]
#[case(404)]
#[case(200)]
#[case(201)]
#[tokio::test]
async fn test_status_does_not_classify_errors(#[case] status: u16) {
    let server = MockServer::start().await;
    let body = json!({"status": status, "message": "from upstream"});
    Mock::given(method("POST"))
        .and(path("/api/v1/versions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let config = Config::new("secret").with_api_url(format!("{}/api/v1/", server.uri()));
    let client = TransformerClient::new(config).unwrap();

    assert_eq!(client.versions("image01").await.unwrap(), Ok(body));
}

#[tokio::test]
async fn test_transport_failure_never_propagates() {
    let config = Config::new("secret")
        .with_api_url("http://127.0.0.1:1/api/v1/")
        .with_delivery_url("http://127.0.0.1:1/");
    let client = TransformerClient::new(config).unwrap();

    let api_failure = client.activate(3).await.unwrap().unwrap_err();
    assert!(!api_failure.code.is_empty());
    assert!(!api_failure.message.is_empty());

    let delivery_failure = client.get_by_id(3).await.unwrap_err();
    assert!(!delivery_failure.code.is_empty());
    assert!(!delivery_failure.message.is_empty());
}
