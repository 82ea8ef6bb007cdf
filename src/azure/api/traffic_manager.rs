// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::azure::{Profile, ProfileDefinition};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

/// Traffic Manager profiles (`services/WATM`).
#[derive(Debug)]
pub struct TrafficManagerApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> TrafficManagerApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.client
            .list_or_empty(
                &Call::get(&["services", "WATM", "profiles"]),
                xml::parse_list::<Profile>,
            )
            .await
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn get(&self, name: &str) -> Result<Option<Profile>> {
        self.client
            .get_or_none(
                &Call::get(&["services", "WATM", "profiles", name]),
                xml::parse::<Profile>,
            )
            .await
    }

    /// The routing definition of a profile. Profiles carry a single
    /// definition, version 1.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn definition(&self, name: &str) -> Result<Option<ProfileDefinition>> {
        self.client
            .get_or_none(
                &Call::get(&["services", "WATM", "profiles", name, "definitions", "1"]),
                xml::parse::<ProfileDefinition>,
            )
            .await
    }

    /// Delete a profile; `false` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any other provider fault.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        self.client
            .succeeded(&Call::delete(&["services", "WATM", "profiles", name]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::azure::api::testing::api;
    use crate::azure::LoadBalancingMethod;
    use crate::testkit::{MockResponse, MockTransport};

    const PROFILES: &str = "/1234/services/WATM/profiles";

    #[tokio::test]
    async fn test_profiles() {
        let api = api(
            MockTransport::new()
                .with_route(
                    "GET",
                    PROFILES,
                    MockResponse::ok(&include_bytes!("../../../tests/fixtures/azure/profiles.xml")[..]),
                )
                .with_route(
                    "GET",
                    &format!("{PROFILES}/neotys"),
                    MockResponse::ok(
                        "<Profile xmlns=\"http://schemas.microsoft.com/windowsazure\">\
                         <DomainName>neotys.trafficmanager.net</DomainName><Name>neotys</Name>\
                         <Status>Enabled</Status></Profile>",
                    ),
                )
                .with_route(
                    "GET",
                    &format!("{PROFILES}/neotys/definitions/1"),
                    MockResponse::ok(
                        &include_bytes!("../../../tests/fixtures/azure/definition.xml")[..],
                    ),
                )
                .with_route("GET", &format!("{PROFILES}/gone"), MockResponse::status(404)),
        );
        let traffic = api.traffic_manager();
        assert_eq!(traffic.list().await.unwrap()[0].name, "neotys");
        assert!(traffic.get("neotys").await.unwrap().unwrap().definitions.is_empty());
        assert!(traffic.get("gone").await.unwrap().is_none());
        assert_eq!(
            traffic
                .definition("neotys")
                .await
                .unwrap()
                .unwrap()
                .load_balancing_method,
            Some(LoadBalancingMethod::Performance)
        );
    }

    #[tokio::test]
    async fn test_delete_profile() {
        let api = api(
            MockTransport::new()
                .with_route("DELETE", &format!("{PROFILES}/neotys"), MockResponse::status(200))
                .with_route("DELETE", &format!("{PROFILES}/gone"), MockResponse::status(404))
                .with_route("DELETE", &format!("{PROFILES}/busy"), MockResponse::status(409)),
        );
        let traffic = api.traffic_manager();
        assert!(traffic.delete("neotys").await.unwrap());
        assert!(!traffic.delete("gone").await.unwrap());
        assert_eq!(traffic.delete("busy").await.unwrap_err().status(), Some(409));
    }
}
