//! Drain coordination for the direct and proxy listeners.

use std::future::Future;
use tokio::sync::watch;

/// Why the adapter started draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The process signal (or the caller's stand-in for it) fired.
    Signal,
    /// One listener stopped on its own and took the other one down.
    ServerExited,
}

/// Latch shared by every listener of one adapter.
///
/// Once tripped it stays tripped, so a listener that starts waiting late
/// still drains.
pub struct Shutdown {
    tx: watch::Sender<Option<ShutdownReason>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Start draining. Returns `false` if draining had already started;
    /// the first reason is kept.
    pub fn trigger(&self, reason: ShutdownReason) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        })
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.tx.borrow()
    }

    /// Future that completes once draining starts or the coordinator is
    /// dropped. Suitable as a graceful-shutdown hook for a server.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.wait_for(Option::is_some).await;
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
