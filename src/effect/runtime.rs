//! Tokio runtime configuration and the shared global runtime.
//!
//! [`Executor::global`](super::Executor::global) schedules onto a tokio
//! runtime's blocking pool. This module decides which runtime that is:
//!
//! 1. **Global runtime**: a lazily-initialized multi-thread runtime built
//!    from [`RuntimeConfig::default`]. It is created once and never dropped.
//! 2. **Handle caching**: outside any runtime, the global handle is cached
//!    per thread. Inside a runtime the current handle wins, so tracing
//!    context and runtime settings of the caller are preserved.
//!
//! Callers that want their own sizing build a runtime from a
//! [`RuntimeConfig`] and hand its handle to
//! [`Executor::from_handle`](super::Executor::from_handle).
//!
//! # Examples
//!
//! ```rust
//! use taskwell::effect::runtime::RuntimeConfig;
//! use taskwell::effect::{Executor, TaskEither};
//!
//! let runtime = RuntimeConfig::default()
//!     .with_worker_threads(2)
//!     .with_thread_name("ride-checks")
//!     .build()
//!     .expect("runtime");
//! let executor = Executor::from_handle(runtime.handle().clone());
//!
//! let checked = TaskEither::<String, u32>::succeed(170).force(&executor);
//! assert!(checked.is_right());
//! ```

use std::cell::RefCell;
use std::io;
use std::sync::LazyLock;

use tokio::runtime::{Builder, Handle, Runtime};

/// Upper bound on blocking-pool threads, matching tokio's own default.
pub const DEFAULT_MAX_BLOCKING_THREADS: usize = 512;

/// Thread name used by runtimes built from the default configuration.
pub const DEFAULT_THREAD_NAME: &str = "taskwell-worker";

// =============================================================================
// Configuration
// =============================================================================

/// Sizing and naming of a multi-thread tokio runtime.
///
/// Each forced computation runs as one blocking-pool job, plus one job per
/// forked branch, so `max_blocking_threads` bounds how much of that work
/// runs at the same time. A smaller pool runs less in parallel but never
/// stalls: a waiter runs any branch no thread has started yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuntimeConfig {
    /// Number of async worker threads.
    pub worker_threads: usize,
    /// Maximum number of blocking-pool threads.
    pub max_blocking_threads: usize,
    /// Name given to every runtime thread.
    pub thread_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
            max_blocking_threads: DEFAULT_MAX_BLOCKING_THREADS,
            thread_name: DEFAULT_THREAD_NAME.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Sets the number of async worker threads.
    #[must_use]
    pub const fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Sets the blocking-pool limit.
    #[must_use]
    pub const fn with_max_blocking_threads(mut self, max_blocking_threads: usize) -> Self {
        self.max_blocking_threads = max_blocking_threads;
        self
    }

    /// Sets the thread name.
    #[must_use]
    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Builds a multi-thread runtime from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::InvalidInput` when either thread count is
    /// zero, or the error tokio reports when the runtime cannot be created.
    pub fn build(&self) -> io::Result<Runtime> {
        if self.worker_threads == 0 || self.max_blocking_threads == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "worker_threads and max_blocking_threads must be greater than 0",
            ));
        }

        Builder::new_multi_thread()
            .worker_threads(self.worker_threads)
            .max_blocking_threads(self.max_blocking_threads)
            .thread_name(self.thread_name.clone())
            .enable_all()
            .build()
    }
}

// =============================================================================
// Global Runtime
// =============================================================================

static GLOBAL_RUNTIME: LazyLock<Runtime> = LazyLock::new(|| {
    RuntimeConfig::default()
        .build()
        .expect("Failed to create global tokio runtime")
});

/// Returns the global runtime, creating it on first use.
///
/// # Panics
///
/// Panics on first use if the operating system refuses to create the
/// runtime's threads.
#[inline]
#[must_use]
pub fn global() -> &'static Runtime {
    &GLOBAL_RUNTIME
}

thread_local! {
    static CACHED_HANDLE: RefCell<Option<Handle>> = const { RefCell::new(None) };
}

/// Returns the current runtime's handle, or the global runtime's handle
/// when called outside any runtime.
#[inline]
#[must_use]
pub fn handle() -> Handle {
    if let Ok(current_handle) = Handle::try_current() {
        return current_handle;
    }

    CACHED_HANDLE.with(|cached| {
        cached
            .borrow_mut()
            .get_or_insert_with(|| global().handle().clone())
            .clone()
    })
}
