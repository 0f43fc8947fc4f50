// SPDX-License-Identifier: AGPL-3.0-or-later

/// Ways an opaque global identifier can fail strict decoding.
///
/// These never leave `decode`, which maps all of them onto the empty sentinel pair. They are
/// returned by `try_decode` for callers who want to know why an identifier was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GlobalIdError {
    /// Identifier is not valid base64.
    #[error("invalid base64 encoding in global id: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// Decoded bytes are not a UTF-8 string.
    #[error("global id does not decode to a UTF-8 string")]
    InvalidUtf8,

    /// Decoded string does not contain the type name separator.
    #[error("global id is missing the '{0}' separator")]
    MissingSeparator(char),
}
