// SPDX-License-Identifier: AGPL-3.0-or-later

//! # relay_node
//!
//! Global object identification for GraphQL schemas built with `async-graphql`'s dynamic schema.
//!
//! Every record gets an opaque, globally unique id encoding its type name and its type-local
//! id. A single `node(id: ID!)` root field (and its plural `nodes(ids: [ID!]!)`) refetches any
//! such record, without clients knowing how each type is stored.
//!
//! ```ignore
//! let NodeDefinitions { interface, node_field, .. } = node_definitions(store.clone(), store);
//!
//! let user = Object::new("User")
//!     .implement("Node")
//!     .field(global_id_field("User", |user: &Record, _| user.id));
//! ```
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

mod config;
mod errors;
pub mod global_id;
pub mod graphql;
#[cfg(test)]
mod test_utils;

pub use crate::config::Configuration;
pub use crate::errors::GlobalIdError;
pub use crate::global_id::{decode, encode, try_decode, GlobalId, ResolvedGlobalId};
pub use crate::graphql::{
    global_id_field, node_definitions, AbsentNodesExtension, NodeDefinitions, NodeFetcher,
    TypeResolver,
};
