use std::sync::Arc;

use quill_primitives::ExtensionId;

use crate::surface::Contribution;

/// A statically linked capability provider.
///
/// `H` is the host handle type; extensions only see what the host exposes
/// through it.
pub trait Extension<H: ?Sized>: Send + Sync {
	/// Stable identity, unique across the process.
	fn id(&self) -> ExtensionId;

	/// Lifecycle hook. Called exactly once, at startup, in registration order.
	fn initialize(&self, host: &Arc<H>, contribution: Contribution);
}
