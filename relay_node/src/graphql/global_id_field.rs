// SPDX-License-Identifier: AGPL-3.0-or-later

use std::any::Any;
use std::fmt::Display;

use async_graphql::dynamic::{Field, FieldFuture, TypeRef};
use async_graphql::{Context, Value};

use crate::global_id::encode;
use crate::graphql::constants;

/// Build the `id: ID!` field of an object type implementing the node interface.
///
/// The parent value of the field is expected to be a record of type `R`, as returned by the
/// `NodeFetcher` or by any other resolver returning objects of this type. `id_accessor` reads
/// the local id from that record, which gets encoded together with `type_name` into the global
/// id.
///
/// ```ignore
/// let user = Object::new("User")
///     .implement("Node")
///     .field(global_id_field("User", |user: &User, _| user.id));
/// ```
pub fn global_id_field<R, F, I>(type_name: impl Into<String>, id_accessor: F) -> Field
where
    R: Any + Send + Sync,
    F: Fn(&R, &Context<'_>) -> I + Send + Sync + 'static,
    I: Display,
{
    let type_name = type_name.into();
    let description = format!("The global id of this `{type_name}` object.");

    Field::new(
        constants::ID_FIELD,
        TypeRef::named_nn(TypeRef::ID),
        move |ctx| {
            let global_id = ctx
                .parent_value
                .try_downcast_ref::<R>()
                .map(|record| encode(&type_name, id_accessor(record, &ctx)));

            FieldFuture::new(async move { Ok(Some(Value::String(global_id?))) })
        },
    )
    .description(description)
}
