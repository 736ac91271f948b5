//! Optional global bindings for registered commands.
//!
//! Some hosts expose every command as a top-level callable (a scripting
//! console's global namespace, a key-binding table). The shell never owns
//! that namespace; it only tells a host-supplied [`GlobalRegistrar`] which
//! bindings to create. The host invokes a binding with
//! [`Shell::call`](crate::Shell::call).

/// Host capability notified when commands are registered.
pub trait GlobalRegistrar {
    /// Whether `binding` already exists in the host namespace.
    fn is_bound(&self, binding: &str) -> bool;

    /// Create or replace `binding` so that it invokes `command`.
    fn bind(&self, binding: &str, command: &str);
}
