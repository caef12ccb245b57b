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

//! JSON structures and protocol bits for the Cloud API.
//!
//! All fields are required on purpose: a response missing an expected field
//! is a malformed response, not a record with defaults.

#![allow(missing_docs)]

use serde::Deserialize;

/// Generic list of resources as returned by collection endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

/// A virtual server with its nested sub-resources.
///
/// Volumes and NICs are only populated by the server when the query depth
/// is at least 3.
#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub id: String,
    pub metadata: Metadata,
    pub properties: ServerProperties,
    pub entities: ServerEntities,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProperties {
    pub name: String,
    pub cores: u32,
    /// RAM size in megabytes.
    pub ram: u64,
    pub vm_state: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Metadata {
    pub state: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerEntities {
    pub volumes: ItemList<Volume>,
    pub nics: ItemList<Nic>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Volume {
    pub id: String,
    pub properties: VolumeProperties,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VolumeProperties {
    /// Volume size in gigabytes.
    pub size: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Nic {
    pub id: String,
    pub properties: NicProperties,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NicProperties {
    pub mac: String,
}

/// A location a data center can be provisioned in.
#[derive(Clone, Debug, Deserialize)]
pub struct Location {
    pub id: String,
    pub properties: LocationProperties,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LocationProperties {
    pub name: String,
}
