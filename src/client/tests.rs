// SPDX-License-Identifier: MIT OR Apache-2.0

use super::*;
use crate::azure::ErrorCode;
use crate::config::CloudContext;
use crate::testkit::{MockResponse, MockTransport};

fn azure_client(transport: MockTransport) -> ApiClient<MockTransport> {
    ApiClient::new(
        transport,
        ClientConfig::azure_at("https://management.test", "1234").unwrap(),
    )
}

#[test]
fn test_azure_config_defaults() {
    let config = ClientConfig::azure("sub").unwrap();
    assert_eq!(config.endpoint.as_str(), "https://management.core.windows.net/sub");
    assert_eq!(config.header(AZURE_VERSION_HEADER), Some(DEFAULT_AZURE_API_VERSION));
}

#[test]
fn test_config_rejects_bad_input() {
    assert!(matches!(
        ClientConfig::azure("  "),
        Err(CloudError::Config(_))
    ));
    assert!(matches!(
        ClientConfig::new("not a url"),
        Err(CloudError::Config(_))
    ));
    assert!(matches!(
        ClientConfig::new("mailto:ops@example.com"),
        Err(CloudError::Config(_))
    ));
}

#[test]
fn test_with_header_replaces_case_insensitively() {
    let config = ClientConfig::new("https://api.test")
        .unwrap()
        .with_header("X-Token", "a")
        .with_header("x-token", "b");
    assert_eq!(config.headers.len(), 1);
    assert_eq!(config.header("X-TOKEN"), Some("b"));
}

#[test]
fn test_config_from_context() {
    let context = CloudContext {
        provider: Provider::Azure,
        endpoint: "https://management.test/".to_string(),
        subscription_id: Some("1234".to_string()),
        api_version: Some("2014-06-01".to_string()),
        token: None,
    };
    let config = ClientConfig::from_context(&context).unwrap();
    assert_eq!(config.endpoint.as_str(), "https://management.test/1234");
    assert_eq!(config.header(AZURE_VERSION_HEADER), Some("2014-06-01"));

    let context = CloudContext {
        subscription_id: None,
        ..context
    };
    assert!(ClientConfig::from_context(&context).is_err());

    let context = CloudContext {
        provider: Provider::Trove,
        endpoint: "https://trove.test/v1.0/1234".to_string(),
        subscription_id: None,
        api_version: Some("2015-04-01".to_string()),
        token: Some("t0k3n".to_string()),
    };
    let config = ClientConfig::from_context(&context).unwrap();
    assert_eq!(config.header("x-auth-token"), Some("t0k3n"));
    assert!(config.header(AZURE_VERSION_HEADER).is_none());
}

#[test]
fn test_url_encodes_segments_and_query() {
    let client = azure_client(MockTransport::new());
    let call = Call::get(&["services", "hostedservices", "a b"]).with_query("embed-detail", "true");
    assert_eq!(
        client.url(&call).unwrap().as_str(),
        "https://management.test/1234/services/hostedservices/a%20b?embed-detail=true"
    );
}

#[test]
fn test_request_headers_follow_payload() {
    let client = azure_client(MockTransport::new());

    let request = client.request(&Call::get(&["rolesizes"])).unwrap();
    assert_eq!(request.headers()[AZURE_VERSION_HEADER], DEFAULT_AZURE_API_VERSION);
    assert!(request.headers().get(CONTENT_TYPE).is_none());
    assert!(request.body().is_empty());

    let request = client
        .request(&Call::post(&["services", "disks"]).with_xml("<Disk/>".to_string()))
        .unwrap();
    assert_eq!(request.method(), &Method::POST);
    assert_eq!(request.headers()[CONTENT_TYPE], "application/xml");
    assert_eq!(request.body().as_ref(), b"<Disk/>");

    let request = client
        .request(&Call::put(&["x"]).with_json("{}".to_string()))
        .unwrap();
    assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(request.headers()[ACCEPT], "application/json");
}

#[tokio::test]
async fn test_get_or_none_and_list_or_empty() {
    let client = azure_client(
        MockTransport::new()
            .with_route("GET", "/1234/present", MockResponse::ok("7"))
            .with_route("GET", "/1234/absent", MockResponse::status(404)),
    );
    let number = |body: &[u8]| -> Result<Vec<u8>> { Ok(body.to_vec()) };

    assert_eq!(
        client.get_or_none(&Call::get(&["present"]), number).await.unwrap(),
        Some(b"7".to_vec())
    );
    assert_eq!(
        client.get_or_none(&Call::get(&["absent"]), number).await.unwrap(),
        None
    );
    assert!(client
        .list_or_empty(&Call::get(&["absent"]), |_| Ok(vec![1u8]))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_accepted_helpers() {
    let client = azure_client(
        MockTransport::new()
            .with_route("DELETE", "/1234/found", MockResponse::accepted("req-1"))
            .with_route("DELETE", "/1234/missing", MockResponse::status(404))
            .with_route("POST", "/1234/anonymous", MockResponse::status(202))
            .with_route("POST", "/1234/missing", MockResponse::status(404)),
    );

    assert_eq!(
        client.accepted_or_none(&Call::delete(&["found"])).await.unwrap().as_deref(),
        Some("req-1")
    );
    assert!(client
        .accepted_or_none(&Call::delete(&["missing"]))
        .await
        .unwrap()
        .is_none());
    assert_eq!(client.accepted(&Call::post(&["anonymous"])).await.unwrap(), "");

    let err = client.accepted(&Call::post(&["missing"])).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_succeeded() {
    let client = azure_client(
        MockTransport::new()
            .with_route("POST", "/1234/ok", MockResponse::status(204))
            .with_route("POST", "/1234/gone", MockResponse::status(404))
            .with_route("POST", "/1234/conflict", MockResponse::status(409)),
    );
    assert!(client.succeeded(&Call::post(&["ok"])).await.unwrap());
    assert!(!client.succeeded(&Call::post(&["gone"])).await.unwrap());
    assert_eq!(
        client
            .succeeded(&Call::post(&["conflict"]))
            .await
            .unwrap_err()
            .status(),
        Some(409)
    );
}

#[tokio::test]
async fn test_provider_error_keeps_azure_fault() {
    let client = azure_client(MockTransport::new().with_route(
        "GET",
        "/1234/services/hostedservices",
        MockResponse::status(400)
            .with_body(&include_bytes!("../../tests/fixtures/azure/error.xml")[..]),
    ));
    let err = client
        .fetch(&Call::get(&["services", "hostedservices"]), |_| Ok(()))
        .await
        .unwrap_err();
    match err {
        CloudError::Provider { status, error, body } => {
            assert_eq!(status, 400);
            assert_eq!(
                error.unwrap().code,
                ErrorCode::MissingOrInvalidRequiredQueryParameter
            );
            assert!(body.contains("<Error"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_provider_error_without_fault_document() {
    let client = azure_client(MockTransport::new().with_route(
        "GET",
        "/1234/x",
        MockResponse::status(500).with_body("upstream timeout"),
    ));
    let err = client.fetch(&Call::get(&["x"]), |_| Ok(())).await.unwrap_err();
    assert!(matches!(
        err,
        CloudError::Provider { status: 500, error: None, ref body } if body == "upstream timeout"
    ));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let client = azure_client(MockTransport::new());
    let err = client.send(&Call::get(&["unrouted"])).await.unwrap_err();
    assert!(matches!(err, CloudError::Transport(_)));
}

#[test]
fn test_json_helpers() {
    let value: serde_json::Value = parse_json(br#"{"a":[1,2]}"#).unwrap();
    assert_eq!(value["a"][1], 2);
    assert!(parse_json::<serde_json::Value>(b"<xml/>")
        .unwrap_err()
        .is_malformed_document());
    assert_eq!(to_json(&vec!["x"]).unwrap(), r#"["x"]"#);
}
