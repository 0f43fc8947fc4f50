// SPDX-License-Identifier: AGPL-3.0-or-later

mod store;
mod test_schema;

pub use store::{Record, TestStore, User};
pub use test_schema::{build_test_schema, schema};

/// Initialise logging for tests, ignoring repeated calls.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
