// SPDX-License-Identifier: AGPL-3.0-or-later

//! Opaque global identifiers.
//!
//! A global id is the base64 encoding of `<type name>:<local id>`. It is deterministic, so the
//! same pair always produces the same string, and `"User:1"` encodes to `"VXNlcjox"`. Clients
//! must treat the value as opaque: only this module ever looks inside it.
use std::fmt::{self, Display};
use std::str::FromStr;

use async_graphql::Value;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use log::debug;

use crate::errors::GlobalIdError;

/// Character joining type name and local id before encoding.
pub const SEPARATOR: char = ':';

/// Standard base64 alphabet, padded on encode and lenient about padding on decode.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Type name and local id recovered from a global id.
///
/// The default value, with both parts empty, is the sentinel `decode` returns for malformed
/// input. No object type has an empty name, so looking it up always misses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResolvedGlobalId {
    /// Name of the object type owning the record.
    pub type_name: String,

    /// Identifier of the record, only meaningful to the fetcher of that type.
    pub id: String,
}

impl ResolvedGlobalId {
    /// Returns true if this is the sentinel of a malformed identifier.
    pub fn is_empty(&self) -> bool {
        self.type_name.is_empty() && self.id.is_empty()
    }
}

/// Encode a type name and a type-local identifier into an opaque global id.
///
/// Never fails. An empty type name or a type name containing `:` still gives a string, it just
/// won't decode back into the same pair.
pub fn encode(type_name: &str, id: impl Display) -> String {
    ENGINE.encode(format!("{type_name}{SEPARATOR}{id}"))
}

/// Decode an opaque global id into its type name and local id.
///
/// Input comes straight from clients, so this is total: anything that is not base64, not UTF-8
/// or lacks a separator yields the empty sentinel pair.
pub fn decode(global_id: &str) -> ResolvedGlobalId {
    match try_decode(global_id) {
        Ok(resolved) => resolved,
        Err(err) => {
            debug!("Could not decode global id {global_id:?}: {err}");
            ResolvedGlobalId::default()
        }
    }
}

/// Decode an opaque global id, reporting why it was rejected.
///
/// Only the first separator splits; every further `:` stays part of the local id.
pub fn try_decode(global_id: &str) -> Result<ResolvedGlobalId, GlobalIdError> {
    let bytes = ENGINE.decode(global_id)?;
    let unbased = String::from_utf8(bytes).map_err(|_| GlobalIdError::InvalidUtf8)?;

    match unbased.split_once(SEPARATOR) {
        Some((type_name, id)) => Ok(ResolvedGlobalId {
            type_name: type_name.to_string(),
            id: id.to_string(),
        }),
        None => Err(GlobalIdError::MissingSeparator(SEPARATOR)),
    }
}

/// An encoded global id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlobalId(String);

impl GlobalId {
    /// Encode a new global id from a type name and local id.
    pub fn new(type_name: &str, id: impl Display) -> Self {
        Self(encode(type_name, id))
    }

    /// Returns the decoded type name and local id, or the sentinel pair if malformed.
    pub fn decode(&self) -> ResolvedGlobalId {
        decode(&self.0)
    }

    /// Returns the opaque string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parsing is strict: only well-formed identifiers are accepted.
impl FromStr for GlobalId {
    type Err = GlobalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_decode(s)?;
        Ok(Self(s.to_string()))
    }
}

impl From<&ResolvedGlobalId> for GlobalId {
    fn from(resolved: &ResolvedGlobalId) -> Self {
        Self::new(&resolved.type_name, &resolved.id)
    }
}

impl From<GlobalId> for Value {
    fn from(global_id: GlobalId) -> Self {
        Value::String(global_id.0)
    }
}
