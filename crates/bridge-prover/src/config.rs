//! Routing configuration from TOML.
//!
//! The routing table maps an ordered `(source, dest)` chain-id pair to the
//! contract addresses involved in proving a signal across that pair. Entries
//! are not symmetric: `(A, B)` is independent of `(B, A)`.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

use crate::error::{ProverError, Result};

/// Contract addresses for one `(source, dest)` chain pair.
///
/// `bridge_address` and `signal_service_address` live on the source chain;
/// `cross_chain_sync_address` is the observer-side contract that anchors the
/// source chain's blocks (on the destination chain, or on the first hop
/// chain when the route is relayed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingEntry {
    pub src_chain_id: u64,
    pub dest_chain_id: u64,
    pub bridge_address: Address,
    pub signal_service_address: Address,
    pub cross_chain_sync_address: Address,

    /// Token vault addresses. Configuration-only: carried for callers that
    /// build vault transactions, never consumed by the proof assembler.
    pub erc20_vault_address: Option<Address>,
    pub erc721_vault_address: Option<Address>,
    pub erc1155_vault_address: Option<Address>,

    /// Intermediate chains the signal is relayed through, in traversal
    /// order. `None` means a direct route; `Some` with an empty list is a
    /// misconfiguration and is rejected when the hops are needed.
    pub hops: Option<Vec<HopDescriptor>>,
}

/// One intermediate chain in a relayed route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HopDescriptor {
    pub chain_id: u64,
    pub cross_chain_sync_address: Address,
    pub signal_service_address: Address,
}

/// Immutable routing table, loaded once at startup.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    entries: HashMap<(u64, u64), RoutingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RoutingFile {
    routes: Vec<RoutingEntry>,
}

impl RoutingTable {
    /// Load the routing table from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProverError::Config(e.to_string()))?;
        let file: RoutingFile =
            toml::from_str(&contents).map_err(|e| ProverError::Config(e.to_string()))?;
        Self::from_routes(file.routes)
    }

    /// Build the routing table from already-parsed entries.
    pub fn from_routes(routes: Vec<RoutingEntry>) -> Result<Self> {
        let mut entries = HashMap::with_capacity(routes.len());
        for route in routes {
            let pair = (route.src_chain_id, route.dest_chain_id);
            if entries.insert(pair, route).is_some() {
                return Err(ProverError::Config(format!(
                    "duplicate routing entry for chain pair ({}, {})",
                    pair.0, pair.1
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Look up the entry for an ordered `(source, dest)` pair.
    ///
    /// A missing pair is reported as a bridge-config error: the route the
    /// caller is asking to prove was never configured.
    pub fn route(&self, src_chain_id: u64, dest_chain_id: u64) -> Result<&RoutingEntry> {
        self.entries.get(&(src_chain_id, dest_chain_id)).ok_or_else(|| {
            ProverError::WrongBridgeConfig {
                src_chain_id,
                dest_chain_id,
                reason: "no routing entry configured".to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
[[routes]]
src_chain_id = 1
dest_chain_id = 167000
bridge_address = "0xd60247c6848B7Ca29eDdF63AA924E53dB6Ddd8EC"
signal_service_address = "0x9e0a24964e5397B566c1ed39258e21aB5E35C77C"
cross_chain_sync_address = "0x79C9109b764609df928d16fC4a91e9081F7e87DB"
erc20_vault_address = "0x996282cA11E5DEb6B5D122CC3B9A1FcAAD4415Ab"

[[routes]]
src_chain_id = 167000
dest_chain_id = 1
bridge_address = "0x1670000000000000000000000000000000000001"
signal_service_address = "0x1670000000000000000000000000000000000005"
cross_chain_sync_address = "0x06a9Ab27c7e2255df1815E6CC0168d7755Feb19a"

[[routes.hops]]
chain_id = 167001
cross_chain_sync_address = "0x1670010000000000000000000000000000010001"
signal_service_address = "0x1670010000000000000000000000000000010005"
"#
    }

    #[test]
    fn test_parse_routing_table() {
        let file: RoutingFile = toml::from_str(sample_toml()).unwrap();
        let table = RoutingTable::from_routes(file.routes).unwrap();

        let direct = table.route(1, 167000).unwrap();
        assert!(direct.hops.is_none());
        assert!(direct.erc20_vault_address.is_some());
        assert!(direct.erc721_vault_address.is_none());

        let relayed = table.route(167000, 1).unwrap();
        let hops = relayed.hops.as_ref().unwrap();
        assert_eq!(hops.len(), 1);
        assert_eq!(hops[0].chain_id, 167001);
    }

    #[test]
    fn test_routing_is_not_symmetric() {
        let file: RoutingFile = toml::from_str(sample_toml()).unwrap();
        let table = RoutingTable::from_routes(file.routes).unwrap();

        let forward = table.route(1, 167000).unwrap();
        let reverse = table.route(167000, 1).unwrap();
        assert_ne!(forward.bridge_address, reverse.bridge_address);
    }

    #[test]
    fn test_missing_route_is_config_error() {
        let table = RoutingTable::from_routes(vec![]).unwrap();
        let err = table.route(1, 2).unwrap_err();
        assert!(matches!(
            err,
            ProverError::WrongBridgeConfig {
                src_chain_id: 1,
                dest_chain_id: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let file: RoutingFile = toml::from_str(sample_toml()).unwrap();
        let mut routes = file.routes;
        routes.push(routes[0].clone());

        let err = RoutingTable::from_routes(routes).unwrap_err();
        assert!(matches!(err, ProverError::Config(_)));
    }
}
