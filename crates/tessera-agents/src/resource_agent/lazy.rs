// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lazy lookups: futures that settle when a declared resource gets decoded.
//!
//! Pending lookups are parked in a [`LazyBroker`], one list of one-shot
//! senders per name. The list is drained and dropped in the same critical
//! section that stores the decoded resource, so a lookup can never slip in
//! between and miss the delivery.

use super::error::{RegistryError, Result};
use std::{
    collections::HashMap,
    fmt,
    future::Future,
    marker::PhantomData,
    pin::Pin,
    task::{Context, Poll},
};
use tessera_core::{AssetHandle, Resource, TypedResource};
use tokio::sync::oneshot;

/// Per-name subscriber lists. Lives inside the registry's locked state.
#[derive(Default)]
pub(crate) struct LazyBroker {
    waiting: HashMap<String, Vec<oneshot::Sender<Resource>>>,
}

impl LazyBroker {
    /// Parks a new subscriber under `name`.
    pub(crate) fn subscribe(&mut self, name: &str) -> oneshot::Receiver<Resource> {
        let (tx, rx) = oneshot::channel();
        self.waiting.entry(name.to_string()).or_default().push(tx);
        rx
    }

    /// Delivers `resource` to every subscriber of `name`, in subscription
    /// order, and forgets them. Returns how many were still listening.
    pub(crate) fn fire(&mut self, name: &str, resource: &Resource) -> usize {
        let Some(senders) = self.waiting.remove(name) else {
            return 0;
        };
        senders
            .into_iter()
            .map(|tx| tx.send(resource.clone()).is_ok())
            .filter(|delivered| *delivered)
            .count()
    }

    /// Number of subscribers waiting on `name`.
    pub(crate) fn pending(&self, name: &str) -> usize {
        self.waiting.get(name).map_or(0, Vec::len)
    }
}

enum LazyState {
    Ready(Resource),
    Pending(oneshot::Receiver<Resource>),
}

/// A resource that may not be decoded yet.
///
/// Returned by [`super::ResourceRegistry::get_lazy`]. Awaiting it yields the
/// same instance `get` returns once the entry is loaded. It does not start a
/// load by itself, and it stays pending across failed loads until a later
/// `load` succeeds for the name. If the registry is dropped first it resolves
/// to [`RegistryError::LazyAbandoned`].
pub struct LazyResource {
    name: String,
    state: LazyState,
}

impl LazyResource {
    pub(crate) fn ready(name: &str, resource: Resource) -> Self {
        Self {
            name: name.to_string(),
            state: LazyState::Ready(resource),
        }
    }

    pub(crate) fn pending(name: &str, receiver: oneshot::Receiver<Resource>) -> Self {
        Self {
            name: name.to_string(),
            state: LazyState::Pending(receiver),
        }
    }

    /// The name this lookup waits on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the resource was already loaded when the lookup was
    /// made.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LazyState::Ready(_))
    }
}

impl Future for LazyResource {
    type Output = Result<Resource>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            LazyState::Ready(resource) => Poll::Ready(Ok(resource.clone())),
            LazyState::Pending(receiver) => Pin::new(receiver).poll(cx).map(|delivered| {
                delivered.map_err(|_| RegistryError::LazyAbandoned {
                    name: this.name.clone(),
                })
            }),
        }
    }
}

impl fmt::Debug for LazyResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResource")
            .field("name", &self.name)
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// A [`LazyResource`] resolving to a statically typed handle.
pub struct TypedLazyResource<T> {
    inner: LazyResource,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedLazyResource<T> {
    pub(crate) fn new(inner: LazyResource) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// The name this lookup waits on.
    pub fn name(&self) -> &str {
        self.inner.name()
    }
}

impl<T: TypedResource> Future for TypedLazyResource<T> {
    type Output = Result<AssetHandle<T>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.inner).poll(cx).map(|resolved| {
            let resource = resolved?;
            T::from_resource(&resource).ok_or_else(|| RegistryError::ShapeMismatch {
                name: this.inner.name.clone(),
                expected: T::SHAPE,
                actual: resource.shape(),
            })
        })
    }
}

impl<T> fmt::Debug for TypedLazyResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedLazyResource").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::resource::DataTable;

    fn table() -> Resource {
        Resource::Table(AssetHandle::new(DataTable::default()))
    }

    #[tokio::test]
    async fn every_subscriber_gets_the_same_instance() {
        let mut broker = LazyBroker::default();
        let first = LazyResource::pending("t", broker.subscribe("t"));
        let second = LazyResource::pending("t", broker.subscribe("t"));
        assert_eq!(broker.pending("t"), 2);

        let resource = table();
        assert_eq!(broker.fire("t", &resource), 2);
        assert_eq!(broker.pending("t"), 0);
        assert_eq!(broker.fire("t", &resource), 0);

        assert!(first.await.unwrap().same_instance(&resource));
        assert!(second.await.unwrap().same_instance(&resource));
    }

    #[tokio::test]
    async fn dropped_broker_abandons_lookups() {
        let mut broker = LazyBroker::default();
        let lazy = LazyResource::pending("t", broker.subscribe("t"));
        drop(broker);
        assert!(matches!(
            lazy.await,
            Err(RegistryError::LazyAbandoned { name }) if name == "t"
        ));
    }

    #[tokio::test]
    async fn typed_lookup_checks_the_variant() {
        let handle = TypedLazyResource::<DataTable>::new(LazyResource::ready("t", table()))
            .await
            .unwrap();
        assert!(handle.is_empty());

        let err = TypedLazyResource::<tessera_core::resource::DataDocument>::new(
            LazyResource::ready("t", table()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RegistryError::ShapeMismatch { .. }));
    }
}
