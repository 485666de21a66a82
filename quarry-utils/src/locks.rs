//! Lock aliases used across the workspace.
//!
//! Everything synchronous goes through `parking_lot`, so callers never have to
//! deal with lock poisoning.

/// A synchronous mutex.
pub type SyncMutex<T> = parking_lot::Mutex<T>;
