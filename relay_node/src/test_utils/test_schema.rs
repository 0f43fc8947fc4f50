// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, Schema, TypeRef};
use async_graphql::Value;
use rstest::fixture;

use crate::graphql::constants::NODE_INTERFACE;
use crate::graphql::{global_id_field, node_definitions, NodeFetcher, TypeResolver};
use crate::test_utils::{init_logger, Record, TestStore};

/// Field reading a value off the parent record, `null` if `read` returns nothing.
fn record_field(name: &str, type_ref: TypeRef, read: fn(&Record) -> Option<Value>) -> Field {
    Field::new(name, type_ref, move |ctx| {
        let value = ctx.parent_value.try_downcast_ref::<Record>().map(read);
        FieldFuture::new(async move { Ok(value?.map(FieldValue::value)) })
    })
}

/// Object type for one variant of `Record`, implementing the node interface.
fn node_object(type_name: &str) -> Object {
    Object::new(type_name)
        .implement(NODE_INTERFACE)
        .field(global_id_field(type_name, |record: &Record, _| {
            record.local_id()
        }))
}

/// Builds a schema with `User`, `Photo` and `Post` nodes, the node root fields and an
/// `allObjects` field listing every record of the test store.
pub fn build_test_schema<F, T>(fetcher: F, type_resolver: T) -> Schema
where
    F: NodeFetcher<Record = Record>,
    T: TypeResolver<Record>,
{
    let user = node_object("User").field(record_field(
        "name",
        TypeRef::named(TypeRef::STRING),
        |record| match record {
            Record::User(user) => Some(Value::from(user.name.clone())),
            _ => None,
        },
    ));

    let photo = node_object("Photo").field(record_field(
        "width",
        TypeRef::named(TypeRef::INT),
        |record| match record {
            Record::Photo(photo) => Some(Value::from(photo.width)),
            _ => None,
        },
    ));

    let post = node_object("Post").field(record_field(
        "text",
        TypeRef::named(TypeRef::STRING),
        |record| match record {
            Record::Post(post) => Some(Value::from(post.text.clone())),
            _ => None,
        },
    ));

    let (schema_builder, query) = node_definitions(fetcher, type_resolver)
        .register(Schema::build("Query", None, None), Object::new("Query"));

    let store = TestStore::default();
    let query = query.field(Field::new(
        "allObjects",
        TypeRef::named_list(NODE_INTERFACE),
        move |_| {
            let records = store.all();
            FieldFuture::new(async move {
                Ok(Some(FieldValue::list(records.into_iter().map(|record| {
                    let type_name = record.type_name();
                    FieldValue::owned_any(record).with_type(type_name)
                }))))
            })
        },
    ));

    schema_builder
        .register(user)
        .register(photo)
        .register(post)
        .register(query)
        .finish()
        .expect("Test schema is valid")
}

/// Test schema backed by the default `TestStore`.
#[fixture]
pub fn schema() -> Schema {
    init_logger();
    build_test_schema(TestStore::default(), TestStore::default())
}
