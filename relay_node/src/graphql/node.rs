// SPDX-License-Identifier: AGPL-3.0-or-later

//! Node interface and the root fields refetching any object by its global id.
//!
//! Any object type implementing the `Node` interface can be fetched again by a client knowing
//! only its opaque global id. The core decodes the id, hands type name and local id to a
//! caller-supplied [`NodeFetcher`] and asks a [`TypeResolver`] which concrete object type the
//! returned record belongs to. How records are stored and classified is entirely up to the
//! caller.
use std::fmt;
use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Interface, InterfaceField, Object, SchemaBuilder,
    TypeRef,
};
use async_graphql::{Context, Error, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use log::{debug, trace};

use crate::config::Configuration;
use crate::global_id::{decode, ResolvedGlobalId};
use crate::graphql::absent_nodes::{AbsentNodes, AbsentNodesExtension};
use crate::graphql::constants;
use crate::graphql::utils::id_argument;

/// Fetches records by type name and local id.
#[async_trait]
pub trait NodeFetcher: Send + Sync + 'static {
    /// Record handed to the object types implementing the node interface.
    ///
    /// Resolvers of those types receive it as their parent value.
    type Record: Send + Sync + 'static;

    /// Returns the record identified by `type_name` and `id`, or `None` if there is none.
    ///
    /// The pair comes from a client supplied identifier and might be the empty pair of a
    /// malformed id. Errors are reported to the client as field errors.
    async fn fetch(
        &self,
        type_name: &str,
        id: &str,
        ctx: &Context<'_>,
    ) -> Result<Option<Self::Record>>;
}

/// Classifies a fetched record into its concrete object type.
#[async_trait]
pub trait TypeResolver<R>: Send + Sync + 'static
where
    R: Send + Sync + 'static,
{
    /// Returns the name of the object type `record` belongs to.
    ///
    /// Returning `None` for a record leaves the engine unable to shape the response, which it
    /// reports as an error for that field.
    async fn resolve_type(&self, record: &R, ctx: &Context<'_>) -> Option<String>;
}

/// Node interface and root fields, ready to be registered on a schema.
pub struct NodeDefinitions {
    /// The `Node` interface with its single `id: ID!` field.
    pub interface: Interface,

    /// Root field `node(id: ID!): Node`.
    pub node_field: Field,

    /// Root field `nodes(ids: [ID!]!): [Node]!`.
    pub nodes_field: Field,
}

/// Build node interface and root fields with default names.
pub fn node_definitions<F, T>(fetcher: F, type_resolver: T) -> NodeDefinitions
where
    F: NodeFetcher,
    T: TypeResolver<F::Record>,
{
    NodeDefinitions::with_config(&Configuration::default(), fetcher, type_resolver)
}

impl NodeDefinitions {
    /// Build node interface and root fields named after the given configuration.
    pub fn with_config<F, T>(config: &Configuration, fetcher: F, type_resolver: T) -> Self
    where
        F: NodeFetcher,
        T: TypeResolver<F::Record>,
    {
        let resolver = Arc::new(NodeResolver {
            fetcher,
            type_resolver,
        });

        Self {
            interface: build_node_interface(config),
            node_field: build_node_field(config, resolver.clone()),
            nodes_field: build_nodes_field(config, resolver),
        }
    }

    /// Register the interface on the schema and add both root fields to the query object.
    ///
    /// Also installs the [`AbsentNodesExtension`] the `nodes` field relies on to answer ids
    /// without a record with `null`.
    pub fn register(self, schema_builder: SchemaBuilder, query: Object) -> (SchemaBuilder, Object) {
        let schema_builder = schema_builder
            .register(self.interface)
            .extension(AbsentNodesExtension);
        let query = query.field(self.node_field).field(self.nodes_field);
        (schema_builder, query)
    }
}

impl fmt::Debug for NodeDefinitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Interface and fields hold resolver closures which can't be printed
        f.debug_struct("NodeDefinitions").finish_non_exhaustive()
    }
}

/// Fetcher and type resolver shared by all node fields of a schema.
struct NodeResolver<F, T> {
    fetcher: F,
    type_resolver: T,
}

impl<F, T> NodeResolver<F, T>
where
    F: NodeFetcher,
    T: TypeResolver<F::Record>,
{
    /// Decode a global id, fetch its record and tag it with its concrete type.
    async fn resolve<'a>(
        &self,
        global_id: &str,
        ctx: &Context<'_>,
    ) -> Result<Option<FieldValue<'a>>> {
        let ResolvedGlobalId { type_name, id } = decode(global_id);

        let record = match self.fetcher.fetch(&type_name, &id, ctx).await? {
            Some(record) => record,
            None => {
                trace!("No node found for type {type_name:?} with id {id:?}");
                return Ok(None);
            }
        };

        let concrete_type = self.type_resolver.resolve_type(&record, ctx).await;
        let value = FieldValue::owned_any(record);

        match concrete_type {
            Some(type_name) => Ok(Some(value.with_type(type_name))),
            None => {
                // Passed on untagged, the engine raises the error for this field
                debug!("Type of node {global_id} could not be resolved");
                Ok(Some(value))
            }
        }
    }
}

fn build_node_interface(config: &Configuration) -> Interface {
    Interface::new(&config.interface_name)
        .field(
            InterfaceField::new(constants::ID_FIELD, TypeRef::named_nn(TypeRef::ID))
                .description("The id of the object."),
        )
        .description("An object with a globally unique id.")
}

fn build_node_field<F, T>(config: &Configuration, resolver: Arc<NodeResolver<F, T>>) -> Field
where
    F: NodeFetcher,
    T: TypeResolver<F::Record>,
{
    Field::new(
        &config.node_field_name,
        TypeRef::named(&config.interface_name),
        move |ctx| {
            let resolver = resolver.clone();

            FieldFuture::new(async move {
                let global_id = id_argument(ctx.args.try_get(constants::ID_ARG)?)?;
                debug!("Query to node received for global id {global_id}");

                resolver.resolve(&global_id, &ctx).await
            })
        },
    )
    .argument(
        InputValue::new(constants::ID_ARG, TypeRef::named_nn(TypeRef::ID))
            .description("The id of an object."),
    )
    .description("Fetches an object given its id.")
}

fn build_nodes_field<F, T>(config: &Configuration, resolver: Arc<NodeResolver<F, T>>) -> Field
where
    F: NodeFetcher,
    T: TypeResolver<F::Record>,
{
    let max_nodes = config.max_nodes_per_query;

    Field::new(
        &config.nodes_field_name,
        TypeRef::named_list_nn(&config.interface_name),
        move |ctx| {
            let resolver = resolver.clone();

            FieldFuture::new(async move {
                let ids = ctx.args.try_get(constants::IDS_ARG)?;
                let ids = ids.list()?;
                if ids.len() > max_nodes {
                    return Err(Error::new(format!(
                        "Requested {} nodes, at most {max_nodes} are allowed per query",
                        ids.len()
                    )));
                }

                let global_ids = ids.iter().map(id_argument).collect::<Result<Vec<_>>>()?;
                debug!("Query to nodes received for {} global ids", global_ids.len());

                let nodes = try_join_all(
                    global_ids
                        .iter()
                        .map(|global_id| resolver.resolve(global_id, &ctx)),
                )
                .await?;

                if nodes.iter().any(Option::is_none) {
                    let (absent, path) = match (ctx.data_opt::<AbsentNodes>(), &ctx.path_node) {
                        (Some(absent), Some(path)) => (absent, path),
                        _ => {
                            return Err(Error::new(
                                "Ids without a node need the AbsentNodesExtension on the schema",
                            ))
                        }
                    };

                    for (index, _) in nodes.iter().enumerate().filter(|(_, node)| node.is_none()) {
                        absent.insert(format!("{path}.{index}"));
                    }
                }

                Ok(Some(FieldValue::list(
                    nodes
                        .into_iter()
                        .map(|node| node.unwrap_or(FieldValue::NULL)),
                )))
            })
        },
    )
    .argument(
        InputValue::new(constants::IDS_ARG, TypeRef::named_nn_list_nn(TypeRef::ID))
            .description("The ids of objects."),
    )
    .description("Fetches objects given their ids, in the order of the ids.")
}
