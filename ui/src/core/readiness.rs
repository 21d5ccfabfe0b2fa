//! One-shot readiness signal for the math renderer.
//!
//! The KaTeX auto-render script loads independently of the widgets. The host
//! page resolves a [`MathReadiness`] once `renderMathInElement` exists, and
//! every widget awaits the same signal before typesetting. Nothing polls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, Shared};
use futures_channel::oneshot;

#[derive(Clone)]
pub struct MathReadiness {
    ready: Shared<oneshot::Receiver<()>>,
    resolver: Rc<RefCell<Option<oneshot::Sender<()>>>>,
    resolved: Rc<Cell<bool>>,
}

impl MathReadiness {
    /// A signal nobody has resolved yet.
    pub fn pending() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            ready: rx.shared(),
            resolver: Rc::new(RefCell::new(Some(tx))),
            resolved: Rc::new(Cell::new(false)),
        }
    }

    /// A signal that is already complete.
    pub fn resolved() -> Self {
        let readiness = Self::pending();
        readiness.resolve();
        readiness
    }

    /// Completes the signal. Later calls are no-ops.
    pub fn resolve(&self) {
        if let Some(tx) = self.resolver.borrow_mut().take() {
            let _ = tx.send(());
            self.resolved.set(true);
            tracing::debug!("math renderer ready");
        }
    }

    /// Gives up on the signal: pending and later [`wait`](Self::wait) calls
    /// return `false`. No-op once resolved.
    pub fn abandon(&self) {
        if self.resolver.borrow_mut().take().is_some() {
            tracing::debug!("math renderer abandoned");
        }
    }

    pub fn is_ready(&self) -> bool {
        self.resolved.get()
    }

    /// Waits for [`resolve`](Self::resolve). Returns `false` only if the
    /// signal can no longer complete.
    pub async fn wait(&self) -> bool {
        if self.is_ready() {
            return true;
        }
        self.ready.clone().await.is_ok()
    }
}

impl Default for MathReadiness {
    fn default() -> Self {
        Self::pending()
    }
}
