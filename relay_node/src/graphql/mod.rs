// SPDX-License-Identifier: AGPL-3.0-or-later

//! GraphQL building blocks for refetchable objects: the node interface, its root fields and the
//! global id field of every node.

mod absent_nodes;
pub mod constants;
mod global_id_field;
mod node;
mod utils;

pub use absent_nodes::AbsentNodesExtension;
pub use global_id_field::global_id_field;
pub use node::{node_definitions, NodeDefinitions, NodeFetcher, TypeResolver};
