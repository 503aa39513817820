use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
///
/// Wrapped in a `Once` so the global subscriber is set exactly one time, even
/// when tests run in parallel.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok(); // Ignore the error if another crate already set one.
    });
}

/// Returns true when the current process runs as root (UID 0).
/// Permission-based tests are meaningless there and get skipped.
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid has no side effects and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}
