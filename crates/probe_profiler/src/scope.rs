//! Scoped span guards
//!
//! A guard opens its span when created and closes it when dropped, so the
//! span ends on every exit path: normal return, early return, `?`, and
//! unwinding.
//!
//! [`ProfileScope`] borrows a [`Profiler`] exclusively and dereferences to it,
//! so nested spans are opened through the outer guard. [`SharedProfiler`] is
//! a cloneable, lock-protected handle for hosts that record spans from more
//! than one thread or from code that cannot thread a `&mut Profiler` through.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::Profiler;

/// Guard over an exclusively borrowed profiler
pub struct ProfileScope<'a> {
    profiler: &'a mut Profiler,
    name: &'a str,
}

impl<'a> ProfileScope<'a> {
    pub(crate) fn new(profiler: &'a mut Profiler, name: &'a str) -> Self {
        profiler.start_profile(name);
        Self { profiler, name }
    }

    /// Name of the span this guard closes
    pub fn name(&self) -> &str {
        self.name
    }
}

impl Deref for ProfileScope<'_> {
    type Target = Profiler;

    fn deref(&self) -> &Profiler {
        self.profiler
    }
}

impl DerefMut for ProfileScope<'_> {
    fn deref_mut(&mut self) -> &mut Profiler {
        self.profiler
    }
}

impl Drop for ProfileScope<'_> {
    fn drop(&mut self) {
        self.profiler.end_profile(self.name);
    }
}

/// Cloneable handle to a lock-protected profiler
#[derive(Clone, Debug, Default)]
pub struct SharedProfiler {
    inner: Arc<Mutex<Profiler>>,
}

impl SharedProfiler {
    pub fn new(profiler: Profiler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(profiler)),
        }
    }

    /// Lock the profiler for direct access
    pub fn lock(&self) -> MutexGuard<'_, Profiler> {
        self.inner.lock()
    }

    pub fn start_profile(&self, name: &str) {
        self.inner.lock().start_profile(name);
    }

    pub fn end_profile(&self, name: &str) {
        self.inner.lock().end_profile(name);
    }

    /// Open a span that closes when the returned guard is dropped.
    ///
    /// The lock is only held while opening and closing, never in between.
    pub fn scope(&self, name: &str) -> SharedScope {
        let mut profiler = self.inner.lock();
        // Disabled profiling must not allocate the name
        let name = if profiler.is_recording() {
            profiler.start_profile(name);
            Some(name.to_owned())
        } else {
            None
        };

        SharedScope {
            profiler: self.clone(),
            name,
        }
    }
}

/// Guard returned by [`SharedProfiler::scope`]
#[must_use = "the span ends as soon as the guard is dropped"]
pub struct SharedScope {
    profiler: SharedProfiler,
    name: Option<String>,
}

impl SharedScope {
    /// Span name, if the span was actually opened
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Drop for SharedScope {
    fn drop(&mut self) {
        if let Some(name) = self.name.take() {
            self.profiler.end_profile(&name);
        }
    }
}
