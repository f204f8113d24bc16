//! In-process signal dispatch.
//!
//! Components register callbacks for named signals and emit signals with a
//! payload. Every callback connected to a signal runs on its own thread, and
//! [`SignalDispatcher::emit`] blocks until all of them have finished.
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use devkit_signal::SignalDispatcher;
//!
//! struct Order { id: u32 }
//!
//! let dispatcher = SignalDispatcher::<Order>::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//!
//! let counter = seen.clone();
//! dispatcher.connect("order-created", move |_signal, order| {
//!     counter.fetch_add(order.id as usize, Ordering::SeqCst);
//! });
//!
//! let report = dispatcher.emit("order-created", &Order { id: 7 });
//! assert_eq!(report.delivered, 1);
//! assert_eq!(seen.load(Ordering::SeqCst), 7);
//! ```
//!
//! # Panics in callbacks
//!
//! A panicking callback does not affect its siblings or the caller. The
//! panic is logged and counted in [`EmitReport::panicked`].
//!
//! # Ordering
//!
//! Callbacks for one emission run concurrently. No order among them is
//! guaranteed.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

/// Name of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signal(String);

impl Signal {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Signal {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Signal {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Signal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Type alias for signal callbacks.
pub type Callback<P> = Arc<dyn Fn(&Signal, &P) + Send + Sync>;

/// Outcome of one emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Callbacks that ran to completion.
    pub delivered: usize,
    /// Callbacks that panicked.
    pub panicked: usize,
}

impl EmitReport {
    /// Total callbacks invoked.
    pub fn total(&self) -> usize {
        self.delivered + self.panicked
    }

    pub fn is_clean(&self) -> bool {
        self.panicked == 0
    }
}

/// Maps signals to the callbacks listening for them.
///
/// The dispatcher is `Send + Sync` and can be shared across threads behind
/// an `Arc`. Callbacks must be thread-safe.
pub struct SignalDispatcher<P> {
    listeners: Mutex<HashMap<Signal, Vec<Callback<P>>>>,
}

impl<P> Default for SignalDispatcher<P> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }
}

impl<P> SignalDispatcher<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for `signal`.
    ///
    /// A callback may be connected to the same signal more than once; each
    /// registration is invoked on every emission.
    pub fn connect<F>(&self, signal: impl Into<Signal>, callback: F)
    where
        F: Fn(&Signal, &P) + Send + Sync + 'static,
    {
        let signal = signal.into();
        tracing::debug!(signal = %signal, "connecting listener");
        self.lock().entry(signal).or_default().push(Arc::new(callback));
    }

    /// Number of callbacks connected to `signal`.
    pub fn listener_count(&self, signal: impl Into<Signal>) -> usize {
        self.lock().get(&signal.into()).map_or(0, Vec::len)
    }

    /// Removes every callback connected to `signal`, returning how many
    /// were removed.
    pub fn disconnect_all(&self, signal: impl Into<Signal>) -> usize {
        self.lock().remove(&signal.into()).map_or(0, |cbs| cbs.len())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Signal, Vec<Callback<P>>>> {
        // Callbacks never run under the lock, so a poisoned map is still consistent.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Sync> SignalDispatcher<P> {
    /// Emits `signal` to every connected callback and waits for all of them.
    ///
    /// The listener list is snapshotted before any callback runs, so
    /// callbacks may connect further listeners without deadlocking. Those
    /// only see later emissions.
    pub fn emit(&self, signal: impl Into<Signal>, payload: &P) -> EmitReport {
        let signal = signal.into();
        let callbacks = match self.lock().get(&signal) {
            Some(callbacks) => callbacks.clone(),
            None => return EmitReport::default(),
        };

        tracing::debug!(signal = %signal, listeners = callbacks.len(), "emitting");

        let signal = &signal;
        thread::scope(|scope| {
            let handles: Vec<_> = callbacks
                .iter()
                .map(|callback| scope.spawn(move || callback(signal, payload)))
                .collect();

            let mut report = EmitReport::default();
            for handle in handles {
                match handle.join() {
                    Ok(()) => report.delivered += 1,
                    Err(panic) => {
                        tracing::error!(
                            signal = %signal,
                            reason = panic_message(&*panic),
                            "signal callback panicked"
                        );
                        report.panicked += 1;
                    }
                }
            }
            report
        })
    }
}

impl<P> fmt::Debug for SignalDispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<Signal, usize> = self
            .lock()
            .iter()
            .map(|(signal, cbs)| (signal.clone(), cbs.len()))
            .collect();
        f.debug_struct("SignalDispatcher")
            .field("listeners", &counts)
            .finish()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
