// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Request grouping for cooperative cancellation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;
use uuid::Uuid;

/// Groups the requests of one logical operation so they can be aborted
/// together.
///
/// Cloning is cheap and every clone shares the same abort state. The sync
/// core only forwards the sandbox; honoring it is up to the transport.
#[derive(Clone)]
pub struct Sandbox {
    inner: Arc<Inner>,
}

struct Inner {
    id: Uuid,
    aborted: AtomicBool,
    notify: Notify,
}

impl Sandbox {
    /// Creates a new sandbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                aborted: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Returns the identifier used in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Aborts every request sent with this sandbox.
    pub fn abort(&self) {
        tracing::debug!(sandbox = %self.inner.id, "aborting sandbox");
        self.inner.aborted.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Whether [`Sandbox::abort`] has been called.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::SeqCst)
    }

    /// Resolves once the sandbox is aborted.
    pub async fn aborted(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_aborted() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox")
            .field("id", &self.inner.id)
            .field("aborted", &self.is_aborted())
            .finish()
    }
}
