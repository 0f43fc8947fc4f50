// SPDX-License-Identifier: AGPL-3.0-or-later

//! Demo GraphQL schema with users, photos and posts which can all be refetched by their global
//! id.
use std::sync::Arc;

use anyhow::Result;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, Schema, TypeRef};
use async_graphql::{Context, Value};
use async_trait::async_trait;
use relay_node::{global_id_field, Configuration, NodeDefinitions, NodeFetcher, TypeResolver};

/// Name of the root field listing every record.
const ALL_OBJECTS_FIELD: &str = "allObjects";

/// Record of the demo store.
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    User { id: u64, name: String },
    Photo { photo_id: u64, width: i32 },
    Post { id: u64, text: String },
}

impl Record {
    fn type_name(&self) -> &'static str {
        match self {
            Record::User { .. } => "User",
            Record::Photo { .. } => "Photo",
            Record::Post { .. } => "Post",
        }
    }

    fn local_id(&self) -> u64 {
        match self {
            Record::User { id, .. } | Record::Post { id, .. } => *id,
            Record::Photo { photo_id, .. } => *photo_id,
        }
    }

    /// Value of an application field, `None` if this record does not have it.
    fn get(&self, field_name: &str) -> Option<Value> {
        match (self, field_name) {
            (Record::User { name, .. }, "name") => Some(name.clone().into()),
            (Record::Photo { width, .. }, "width") => Some((*width).into()),
            (Record::Post { text, .. }, "text") => Some(text.clone().into()),
            _ => None,
        }
    }
}

/// Records held in memory, shared between all requests.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    records: Arc<Vec<Record>>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Store populated with two users, two photos and two posts.
    pub fn demo() -> Self {
        Self::new(vec![
            Record::User {
                id: 1,
                name: "John Doe".into(),
            },
            Record::User {
                id: 2,
                name: "Jane Smith".into(),
            },
            Record::Photo {
                photo_id: 1,
                width: 300,
            },
            Record::Photo {
                photo_id: 2,
                width: 400,
            },
            Record::Post {
                id: 1,
                text: "lorem".into(),
            },
            Record::Post {
                id: 2,
                text: "ipsum".into(),
            },
        ])
    }
}

#[async_trait]
impl NodeFetcher for MemoryStore {
    type Record = Record;

    async fn fetch(
        &self,
        type_name: &str,
        id: &str,
        _ctx: &Context<'_>,
    ) -> async_graphql::Result<Option<Record>> {
        let record = self
            .records
            .iter()
            .find(|record| record.type_name() == type_name && record.local_id().to_string() == id)
            .cloned();

        Ok(record)
    }
}

#[async_trait]
impl TypeResolver<Record> for MemoryStore {
    async fn resolve_type(&self, record: &Record, _ctx: &Context<'_>) -> Option<String> {
        Some(record.type_name().to_string())
    }
}

/// Build an object type implementing the node interface with the given application fields.
fn build_node_object(config: &Configuration, type_name: &str, fields: &[(&str, &str)]) -> Object {
    let object = Object::new(type_name)
        .implement(&config.interface_name)
        .field(global_id_field(type_name, |record: &Record, _| {
            record.local_id()
        }));

    fields.iter().fold(object, |object, (field_name, scalar)| {
        object.field(Field::new(*field_name, TypeRef::named(*scalar), |ctx| {
            let value = ctx
                .parent_value
                .try_downcast_ref::<Record>()
                .map(|record| record.get(ctx.field().name()));

            FieldFuture::new(async move { Ok(value?.map(FieldValue::value)) })
        }))
    })
}

/// Returns the demo schema serving the records of `store`.
pub fn build_demo_schema(config: &Configuration, store: MemoryStore) -> Result<Schema> {
    let user = build_node_object(config, "User", &[("name", TypeRef::STRING)]);
    let photo = build_node_object(config, "Photo", &[("width", TypeRef::INT)]);
    let post = build_node_object(config, "Post", &[("text", TypeRef::STRING)]);

    let (schema_builder, query) =
        NodeDefinitions::with_config(config, store.clone(), store.clone())
            .register(Schema::build("Query", None, None), Object::new("Query"));

    let query = query.field(
        Field::new(
            ALL_OBJECTS_FIELD,
            TypeRef::named_list(&config.interface_name),
            move |_| {
                let records = store.records.clone();

                FieldFuture::new(async move {
                    Ok(Some(FieldValue::list(records.iter().map(|record| {
                        FieldValue::owned_any(record.clone()).with_type(record.type_name())
                    }))))
                })
            },
        )
        .description("All objects of the store."),
    );

    let schema = schema_builder
        .register(user)
        .register(photo)
        .register(post)
        .register(query)
        .finish()?;

    Ok(schema)
}
