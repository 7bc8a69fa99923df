use std::future::Future;
use std::sync::Arc;

use quill_primitives::{BoxFutureStatic, ExtensionId, HostSnapshot, ItemKey};

/// Activation callback of a contributed item.
pub type ActivateFn = Arc<dyn Fn() -> BoxFutureStatic<()> + Send + Sync>;

/// Visibility predicate of a contributed item.
///
/// Must be pure and cheap: it runs on every render pass.
pub type VisibilityFn = Arc<dyn Fn(&HostSnapshot) -> bool + Send + Sync>;

/// Identity of a contribution within one category.
pub type ContributionKey = (ExtensionId, ItemKey);

/// An item that can be stored in a [`crate::ContributionRegistry`].
pub trait Contributed: Send + Sync + 'static {
	/// Owning extension.
	fn extension_id(&self) -> &ExtensionId;

	/// Item key, unique per extension within the category.
	fn key(&self) -> &ItemKey;

	/// Evaluates the visibility predicate against `snapshot`.
	fn is_visible(&self, snapshot: &HostSnapshot) -> bool;

	/// Returns the registry identity of this item.
	fn contribution_key(&self) -> ContributionKey {
		(self.extension_id().clone(), self.key().clone())
	}
}

pub(crate) fn always_visible() -> VisibilityFn {
	Arc::new(|_| true)
}

pub(crate) fn boxed_activation<F, Fut>(on_activate: F) -> ActivateFn
where
	F: Fn() -> Fut + Send + Sync + 'static,
	Fut: Future<Output = ()> + Send + 'static,
{
	Arc::new(move || Box::pin(on_activate()))
}
