//! Event subscription seam between the controller and the compositor.
//!
//! The controller never talks to raw signal machinery. It consumes a narrow
//! [`EventHub`] contract with exactly two shapes: a single-fire await
//! (`once`) and a long-lived observer (`on`) whose lifetime is tied to the
//! returned [`Subscription`] guard. Hosts adapt their shell's native signals
//! onto this hub, scoped to the controller's collaborators (the managed
//! application, the managed window, the display).

use async_trait::async_trait;

/// Identity of a window's compositor actor, used to filter map signals.
pub type ActorId = u64;

/// Signals the controller awaits or observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The managed application's window set changed.
    WindowsChanged,
    /// The managed window left compositor management.
    Unmanaged,
    /// A window actor finished mapping; the payload carries its id.
    Mapped,
    /// The managed window completed a size change.
    SizeChanged,
    /// Input focus moved anywhere on the display.
    FocusChanged,
}

/// Data delivered with a signal occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalPayload {
    /// Actor the signal refers to, when the signal has one ([`Signal::Mapped`]).
    pub actor: Option<ActorId>,
}

impl SignalPayload {
    pub fn for_actor(actor: ActorId) -> Self {
        Self { actor: Some(actor) }
    }
}

/// Long-lived signal observer callback.
pub type SignalHandler = Box<dyn FnMut(SignalPayload)>;

/// One-shot and long-lived signal delivery.
#[async_trait(?Send)]
pub trait EventHub {
    /// Resolve on the next occurrence of `signal`, then detach.
    async fn once(&self, signal: Signal) -> SignalPayload;

    /// Observe every occurrence of `signal` until the returned subscription
    /// is dropped or cancelled.
    fn on(&self, signal: Signal, handler: SignalHandler) -> Subscription;
}

/// Guard for a registered listener; detaches it when dropped.
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Detach eagerly instead of waiting for drop.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
