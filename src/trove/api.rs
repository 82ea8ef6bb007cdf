// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    Database, Databases, Flavor, Flavors, Instance, InstanceEnvelope, InstanceParams, Instances,
    User, Users,
};
use crate::client::{parse_json, to_json, ApiClient, Call, ClientConfig, Transport};
use crate::error::Result;

/// Database instances of one Trove tenant.
#[derive(Debug)]
pub struct TroveApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> TroveApi<T> {
    /// `config` points at the tenant endpoint, for example
    /// `https://ord.databases.api.rackspacecloud.com/v1.0/1234`.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            client: ApiClient::new(transport, config),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        self.client
            .list_or_empty(&Call::get(&["instances"]), |body| {
                Ok(parse_json::<Instances>(body)?.instances)
            })
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get_instance(&self, id: &str) -> Result<Option<Instance>> {
        self.client
            .get_or_none(&Call::get(&["instances", id]), |body| {
                Ok(parse_json::<InstanceEnvelope<Instance>>(body)?.instance)
            })
            .await
    }

    /// Provision an instance; the answer describes it in `BUILD` state.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn create_instance(&self, params: &InstanceParams) -> Result<Instance> {
        let body = to_json(&InstanceEnvelope { instance: params })?;
        let call = Call::post(&["instances"]).with_json(body);
        self.client
            .fetch(&call, |body| {
                Ok(parse_json::<InstanceEnvelope<Instance>>(body)?.instance)
            })
            .await
    }

    /// `false` when the instance does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any other provider fault.
    pub async fn delete_instance(&self, id: &str) -> Result<bool> {
        self.client.succeeded(&Call::delete(&["instances", id])).await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_flavors(&self) -> Result<Vec<Flavor>> {
        self.client
            .list_or_empty(&Call::get(&["flavors"]), |body| {
                Ok(parse_json::<Flavors>(body)?.flavors)
            })
            .await
    }

    /// Databases hosted by an instance.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_databases(&self, instance: &str) -> Result<Vec<Database>> {
        self.client
            .list_or_empty(&Call::get(&["instances", instance, "databases"]), |body| {
                Ok(parse_json::<Databases>(body)?.databases)
            })
            .await
    }

    /// Users of an instance with the databases they may access.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list_users(&self, instance: &str) -> Result<Vec<User>> {
        self.client
            .list_or_empty(&Call::get(&["instances", instance, "users"]), |body| {
                Ok(parse_json::<Users>(body)?.users)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{MockResponse, MockTransport};
    use crate::trove::InstanceStatus;

    const INSTANCE: &str = "098653ba-218b-47ce-936a-e0b749101f81";

    fn api(transport: MockTransport) -> TroveApi<MockTransport> {
        let config = ClientConfig::new("https://trove.test/v1.0/1234")
            .unwrap()
            .with_header("x-auth-token", "token");
        TroveApi::new(transport, config)
    }

    #[tokio::test]
    async fn test_instances() {
        let api = api(
            MockTransport::new()
                .with_route(
                    "GET",
                    "/v1.0/1234/instances",
                    MockResponse::ok(&include_bytes!("../../tests/fixtures/trove/instances.json")[..]),
                )
                .with_route(
                    "GET",
                    &format!("/v1.0/1234/instances/{INSTANCE}"),
                    MockResponse::ok(&include_bytes!("../../tests/fixtures/trove/instance.json")[..]),
                )
                .with_route("GET", "/v1.0/1234/instances/gone", MockResponse::status(404))
                .with_route("DELETE", &format!("/v1.0/1234/instances/{INSTANCE}"), MockResponse::status(202))
                .with_route("DELETE", "/v1.0/1234/instances/gone", MockResponse::status(404)),
        );

        let instances = api.list_instances().await.unwrap();
        let states: Vec<_> = instances.iter().map(|i| i.status).collect();
        assert_eq!(
            states,
            vec![Some(InstanceStatus::Active), Some(InstanceStatus::Build)]
        );

        let instance = api.get_instance(INSTANCE).await.unwrap().unwrap();
        assert_eq!(instance.name, "json_rack_instance");
        assert!(api.get_instance("gone").await.unwrap().is_none());

        assert!(api.delete_instance(INSTANCE).await.unwrap());
        assert!(!api.delete_instance("gone").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_instance() {
        let api = api(MockTransport::new().with_route(
            "POST",
            "/v1.0/1234/instances",
            MockResponse::ok(&include_bytes!("../../tests/fixtures/trove/instance.json")[..]),
        ));
        let params = InstanceParams::new("json_rack_instance", "1", 2)
            .with_database(Database::new("sampledb"))
            .with_user(User::new("demouser", "demopassword").with_database("sampledb"));

        let instance = api.create_instance(&params).await.unwrap();
        assert_eq!(instance.id, INSTANCE);

        let request = api.client().transport().last_request().unwrap();
        assert_eq!(
            request.body,
            include_str!("../../tests/fixtures/trove/create_instance.json").trim_end()
        );
    }

    #[tokio::test]
    async fn test_flavors_databases_users() {
        let api = api(
            MockTransport::new()
                .with_route(
                    "GET",
                    "/v1.0/1234/flavors",
                    MockResponse::ok(&include_bytes!("../../tests/fixtures/trove/flavors.json")[..]),
                )
                .with_route(
                    "GET",
                    &format!("/v1.0/1234/instances/{INSTANCE}/databases"),
                    MockResponse::ok(&include_bytes!("../../tests/fixtures/trove/databases.json")[..]),
                )
                .with_route(
                    "GET",
                    &format!("/v1.0/1234/instances/{INSTANCE}/users"),
                    MockResponse::ok(&include_bytes!("../../tests/fixtures/trove/users.json")[..]),
                )
                .with_route("GET", "/v1.0/1234/instances/gone/users", MockResponse::status(404)),
        );

        let flavors = api.list_flavors().await.unwrap();
        assert_eq!(flavors[1].id, "2");
        assert_eq!(flavors[1].ram, Some(1024));

        let databases = api.list_databases(INSTANCE).await.unwrap();
        assert_eq!(databases.len(), 4);
        assert_eq!(databases[3].name, "sampledb");

        let users = api.list_users(INSTANCE).await.unwrap();
        assert_eq!(users[0].host.as_deref(), Some("%"));
        assert_eq!(users[1].databases.len(), 2);
        assert!(users[2].databases.is_empty());
        assert!(api.list_users("gone").await.unwrap().is_empty());
    }
}
