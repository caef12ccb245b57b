// Copyright 2024 pbcloud contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Session structure definition.
//!
//! The [`Session`] object wraps an HTTP(s) client and a credential pair and
//! exposes the read-only Cloud API calls the tools need. Every request is
//! authenticated with HTTP basic auth; there is no token refresh, retrying
//! or caching.

use log::{debug, trace};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::login::Credentials;
use super::protocol;
use super::{Error, ErrorKind, Result};

/// Default public endpoint of the Cloud API.
pub const DEFAULT_ENDPOINT: &str = "https://api.profitbricks.com/cloudapi/v4";

/// A Cloud API session.
///
/// Owns a credential pair and an underlying HTTP client.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl Session {
    /// Create a new session against the default endpoint.
    pub fn new(credentials: Credentials) -> Result<Session> {
        Session::with_endpoint(credentials, DEFAULT_ENDPOINT)
    }

    /// Create a new session against the given endpoint.
    pub fn with_endpoint(credentials: Credentials, endpoint: &str) -> Result<Session> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::new(ErrorKind::InvalidInput, e.to_string()))?;
        Ok(Session {
            client: Client::builder().build()?,
            endpoint,
            credentials,
        })
    }

    /// List all servers of a data center.
    ///
    /// `depth` controls how many levels of nested sub-resources the response
    /// includes; both volumes and NICs require a depth of at least 3.
    pub fn list_servers(&self, datacenter_id: &str, depth: u32) -> Result<Vec<protocol::Server>> {
        if datacenter_id.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "datacenter ID must not be empty",
            ));
        }
        let url = self.resource_url(
            &["datacenters", datacenter_id, "servers"],
            &[("depth", &depth.to_string())],
        )?;
        let servers: protocol::ItemList<protocol::Server> = self.get(url)?;
        debug!("Received {} servers", servers.items.len());
        Ok(servers.items)
    }

    /// List all available locations.
    ///
    /// The cheapest authenticated call the API offers, also usable as a
    /// connectivity and credential probe.
    pub fn list_locations(&self) -> Result<Vec<protocol::Location>> {
        let url = self.resource_url(&["locations"], &[])?;
        let locations: protocol::ItemList<protocol::Location> = self.get(url)?;
        debug!("Received {} locations", locations.items.len());
        Ok(locations.items)
    }

    /// Issue an authenticated GET request and deserialize the response.
    fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("Fetching {}", url);
        let resp = self
            .client
            .get(url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.password))
            .send()?
            .error_for_status()?;
        trace!("Response status {}", resp.status());
        resp.json().map_err(From::from)
    }

    fn resource_url(&self, path: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| Error::new(ErrorKind::InvalidInput, "endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend(path);
        for (key, value) in query {
            let _ = url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }
}

#[cfg(test)]
pub mod test {
    use super::Session;
    use crate::login::Credentials;
    use crate::ErrorKind;

    fn session() -> Session {
        Session::with_endpoint(
            Credentials::new("user1", "pw"),
            "https://cloud.example.com/cloudapi/v4",
        )
        .unwrap()
    }

    #[test]
    fn test_resource_url() {
        let url = session()
            .resource_url(&["datacenters", "dc-1", "servers"], &[("depth", "3")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.com/cloudapi/v4/datacenters/dc-1/servers?depth=3"
        );
    }

    #[test]
    fn test_resource_url_trailing_slash() {
        let session = Session::with_endpoint(
            Credentials::new("user1", "pw"),
            "https://cloud.example.com/cloudapi/v4/",
        )
        .unwrap();
        let url = session.resource_url(&["locations"], &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://cloud.example.com/cloudapi/v4/locations"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = Session::with_endpoint(Credentials::new("u", "p"), "not a url").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_list_servers_empty_datacenter_id() {
        let err = session().list_servers("", 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
