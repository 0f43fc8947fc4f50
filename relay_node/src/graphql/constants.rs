// SPDX-License-Identifier: AGPL-3.0-or-later

//! String identifiers for the node interface as well as its fixed field and argument names.

/// Default name of the GraphQL interface implemented by refetchable objects.
pub const NODE_INTERFACE: &str = "Node";

/// Default name of the root field fetching a single node.
pub const NODE_FIELD: &str = "node";

/// Default name of the root field fetching a list of nodes.
pub const NODES_FIELD: &str = "nodes";

/// Name of the global id field on every node.
pub const ID_FIELD: &str = "id";

/// Argument string used for passing a global id into the node query.
pub const ID_ARG: &str = "id";

/// Argument string used for passing a list of global ids into the nodes query.
pub const IDS_ARG: &str = "ids";
