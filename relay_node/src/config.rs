// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::graphql::constants;

/// Configuration of the node interface and its root fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Name of the GraphQL interface every refetchable object type implements. Defaults to
    /// "Node".
    pub interface_name: String,

    /// Name of the root field refetching a single node by its global id. Defaults to "node".
    pub node_field_name: String,

    /// Name of the root field refetching a list of nodes by their global ids. Defaults to
    /// "nodes".
    pub nodes_field_name: String,

    /// Maximum number of ids accepted by a single `nodes` query.
    ///
    /// Every id results in one call to the fetcher, keep this low enough for your storage layer.
    pub max_nodes_per_query: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            interface_name: constants::NODE_INTERFACE.into(),
            node_field_name: constants::NODE_FIELD.into(),
            nodes_field_name: constants::NODES_FIELD.into(),
            max_nodes_per_query: 100,
        }
    }
}
