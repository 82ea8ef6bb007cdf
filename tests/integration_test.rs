// SPDX-License-Identifier: MIT OR Apache-2.0

use cloudlabs_api_rs::azure::{CloudServiceParams, OperationStatus, ServiceStatus};
use cloudlabs_api_rs::runtime::{LoggingConfig, LoggingTransport};
use cloudlabs_api_rs::testkit::{MockResponse, MockTransport};
use cloudlabs_api_rs::trove::TroveApi;
use cloudlabs_api_rs::{AzureComputeApi, ClientConfig, CloudConfig, CloudError};

const SERVICES: &str = "/1234/services/hostedservices";

fn fixture(path: &str) -> Vec<u8> {
    let full = format!("{}/tests/fixtures/{path}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read(&full).unwrap_or_else(|e| panic!("cannot read {full}: {e}"))
}

fn azure_config() -> ClientConfig {
    let config = CloudConfig::from_yaml(
        r#"
context: test
contexts:
  test:
    provider: azure
    endpoint: https://management.test
    subscription_id: "1234"
"#,
    )
    .unwrap();
    ClientConfig::from_context(config.active_context().unwrap()).unwrap()
}

#[tokio::test]
async fn test_cloud_service_lifecycle() -> anyhow::Result<()> {
    let transport = MockTransport::new()
        .with_route("GET", SERVICES, MockResponse::ok(fixture("azure/hostedservices.xml")))
        .with_route(
            "GET",
            &format!("{SERVICES}/neotys?embed-detail=true"),
            MockResponse::ok(fixture("azure/hostedservice_details.xml")),
        )
        .with_route("POST", SERVICES, MockResponse::accepted("request-id"))
        .with_route(
            "GET",
            "/1234/operations/request-id",
            MockResponse::ok(fixture("azure/operation.xml")),
        )
        .with_route(
            "POST",
            &format!("{SERVICES}/neotys/deployments/neotys/roleinstances/neotys/Operations"),
            MockResponse::accepted("start-1"),
        )
        .with_route(
            "DELETE",
            &format!("{SERVICES}/gone?comp=media"),
            MockResponse::status(404),
        );
    let api = AzureComputeApi::new(
        LoggingTransport::with_config(transport, LoggingConfig::verbose()),
        azure_config(),
    );

    let services = api.cloud_services().list().await?;
    assert_eq!(services.len(), 2);
    assert!(services
        .iter()
        .all(|s| s.status == Some(ServiceStatus::Created)));

    let details = api.cloud_services().get("neotys").await?.expect("service exists");
    assert_eq!(details.deployments.len(), 1);
    let deployment = &details.deployments[0];
    assert_eq!(deployment.name, "neotys");

    let params = CloudServiceParams::new("neotys2", "West Europe").with_description("it");
    let request_id = api.cloud_services().create(&params).await?;
    assert_eq!(request_id, "request-id");

    let recorded = api
        .client()
        .transport()
        .inner()
        .last_request()
        .expect("create was sent");
    assert_eq!(recorded.body, params.to_xml()?);
    assert_eq!(recorded.headers["x-ms-version"], "2015-04-01");

    let operation = api
        .get_operation(&request_id)
        .await?
        .expect("operation exists");
    assert_eq!(operation.status, OperationStatus::Failed);
    assert!(operation.error.is_some());

    let started = api
        .virtual_machines("neotys", &deployment.name)
        .start("neotys")
        .await?;
    assert_eq!(started.as_deref(), Some("start-1"));

    assert!(api.cloud_services().delete("gone").await?.is_none());

    let metrics = api.client().transport().logger().metrics();
    assert_eq!(metrics.total_requests(), 6);
    assert_eq!(metrics.failed_requests(), 1);
    Ok(())
}

#[tokio::test]
async fn test_provider_fault_surfaces_azure_error() {
    let transport = MockTransport::new().with_route(
        "GET",
        "/1234/rolesizes",
        MockResponse::status(400).with_body(fixture("azure/error.xml")),
    );
    let api = AzureComputeApi::new(transport, azure_config());

    match api.list_role_sizes().await {
        Err(CloudError::Provider {
            status: 400,
            error: Some(error),
            ..
        }) => assert!(error.message.starts_with("A required query parameter")),
        other => panic!("expected a provider fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_reported() {
    let transport = MockTransport::new().with_route(
        "GET",
        "/1234/locations",
        MockResponse::ok("<Locations><Location><Name>West"),
    );
    let api = AzureComputeApi::new(transport, azure_config());

    let err = api.list_locations().await.unwrap_err();
    assert!(err.is_malformed_document(), "{err}");
}

#[tokio::test]
async fn test_json_provider_through_context() -> anyhow::Result<()> {
    let config = CloudConfig::from_yaml(
        r#"
context: db
contexts:
  db:
    provider: trove
    endpoint: https://trove.test/v1.0/1234
    token: secret
"#,
    )?;
    let client_config = ClientConfig::from_context(config.active_context().unwrap())?;
    let transport = MockTransport::new()
        .with_route("GET", "/v1.0/1234/flavors", MockResponse::ok(fixture("trove/flavors.json")))
        .with_route("GET", "/v1.0/1234/instances", MockResponse::status(404));
    let api = TroveApi::new(transport, client_config);

    let flavors = api.list_flavors().await?;
    assert_eq!(flavors[0].name, "512MB Instance");
    assert!(api.list_instances().await?.is_empty());

    let sent = api.client().transport().requests();
    assert!(sent.iter().all(|r| r.headers["x-auth-token"] == "secret"));
    Ok(())
}
