// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resolves absent entries of the plural node field to `null`.
//!
//! The dynamic schema only accepts typed values as items of an interface list, so an entry
//! without a record can't be handed to the engine directly. The `nodes` resolver records the
//! response path of every such entry instead, and this extension answers them with `null`
//! before the engine looks at their value.
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_graphql::extensions::{
    Extension, ExtensionContext, ExtensionFactory, NextPrepareRequest, NextResolve, ResolveInfo,
};
use async_graphql::{Request, ServerResult, Value};
use async_trait::async_trait;

/// Response paths of list entries which did not resolve to a node, scoped to one request.
#[derive(Clone, Debug, Default)]
pub struct AbsentNodes(Arc<Mutex<HashSet<String>>>);

impl AbsentNodes {
    /// Mark the entry at `path` as absent.
    pub fn insert(&self, path: String) {
        if let Ok(mut paths) = self.0.lock() {
            paths.insert(path);
        }
    }

    /// Returns true and forgets the path if the entry at `path` was marked absent.
    fn take(&self, path: &str) -> bool {
        match self.0.lock() {
            Ok(mut paths) => paths.remove(path),
            Err(_) => false,
        }
    }
}

/// Schema extension answering absent entries of the `nodes` field with `null`.
///
/// Registered by [`NodeDefinitions::register`](crate::NodeDefinitions::register).
#[derive(Clone, Copy, Debug, Default)]
pub struct AbsentNodesExtension;

impl ExtensionFactory for AbsentNodesExtension {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(AbsentNodesExtensionImpl::default())
    }
}

#[derive(Default)]
struct AbsentNodesExtensionImpl {
    absent: AbsentNodes,
}

#[async_trait]
impl Extension for AbsentNodesExtensionImpl {
    async fn prepare_request(
        &self,
        ctx: &ExtensionContext<'_>,
        request: Request,
        next: NextPrepareRequest<'_>,
    ) -> ServerResult<Request> {
        next.run(ctx, request.data(self.absent.clone())).await
    }

    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        // Only list entries can be absent
        if info.parent_type.starts_with('[') && self.absent.take(&info.path_node.to_string()) {
            return Ok(None);
        }

        next.run(ctx, info).await
    }
}
