use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, taking the inner value back if a previous holder panicked.
///
/// Poisoning here only means a paint or a restore was interrupted; the guarded
/// terminal state is still the best information available.
pub(crate) fn lock_or_recover<'a, T>(lock: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    lock.lock().unwrap_or_else(|poisoned| {
        tracing::warn!(context, "mutex poisoned; recovering");
        crate::logging::log_debug(&format!("mutex poisoned in {context}; recovering"));
        poisoned.into_inner()
    })
}
