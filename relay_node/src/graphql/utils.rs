// SPDX-License-Identifier: AGPL-3.0-or-later

use async_graphql::dynamic::ValueAccessor;
use async_graphql::Error;

/// Read a global id passed as an `ID` argument.
///
/// `ID` input accepts both string and integer literals, we take either as the opaque string.
pub fn id_argument(value: ValueAccessor) -> Result<String, Error> {
    if let Ok(global_id) = value.string() {
        return Ok(global_id.to_owned());
    }

    match value.i64() {
        Ok(number) => Ok(number.to_string()),
        Err(_) => Err(Error::new("Expected a global id")),
    }
}
