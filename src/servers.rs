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

//! Flattening of server resources into summary records.

use log::debug;

use super::protocol;
use super::session::Session;
use super::Result;

/// Query depth needed to receive both volumes and NICs with the servers.
pub const INFO_DEPTH: u32 = 3;

/// Flat summary of a single server.
///
/// One record per server, produced fresh per query. `storage` is the sum of
/// the sizes of all attached volumes; `macs` keeps one entry per NIC in the
/// order the API returned them, duplicates included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server unique ID.
    pub id: String,
    /// Server display name.
    pub name: String,
    /// Number of CPU cores.
    pub cores: u32,
    /// RAM size in megabytes.
    pub ram: u64,
    /// Number of attached volumes.
    pub disks: usize,
    /// Total size of all attached volumes in gigabytes.
    pub storage: u64,
    /// Number of NICs.
    pub nics: usize,
    /// MAC addresses, one per NIC.
    pub macs: Vec<String>,
    /// Lifecycle state of the server resource.
    pub state: String,
    /// Power state of the virtual machine.
    pub vm_state: String,
}

impl From<protocol::Server> for ServerInfo {
    fn from(server: protocol::Server) -> ServerInfo {
        let volumes = server.entities.volumes.items;
        let nics = server.entities.nics.items;
        ServerInfo {
            id: server.id,
            name: server.properties.name,
            cores: server.properties.cores,
            ram: server.properties.ram,
            disks: volumes.len(),
            storage: volumes.iter().map(|vol| vol.properties.size).sum(),
            nics: nics.len(),
            macs: nics.into_iter().map(|nic| nic.properties.mac).collect(),
            state: server.metadata.state,
            vm_state: server.properties.vm_state,
        }
    }
}

/// Collect summary records for all servers of a data center.
///
/// Records come back in the order the API returned the servers.
pub fn server_info(session: &Session, datacenter_id: &str) -> Result<Vec<ServerInfo>> {
    let servers = session.list_servers(datacenter_id, INFO_DEPTH)?;
    debug!(
        "Summarizing {} servers of data center {}",
        servers.len(),
        datacenter_id
    );
    Ok(servers.into_iter().map(ServerInfo::from).collect())
}
