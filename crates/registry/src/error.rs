use quill_primitives::ExtensionId;

/// Host wiring errors raised by [`crate::ExtensionManager`].
///
/// All of these are programmer errors; startup should abort on them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtensionError {
	/// An extension with the same identity is already registered.
	#[error("duplicate extension id: {0}")]
	Duplicate(ExtensionId),
	/// `initialize_all` was called more than once.
	#[error("extensions already initialized")]
	AlreadyInitialized,
	/// An extension was registered after `initialize_all` ran; its hook would never fire.
	#[error("extension {0} registered after initialization")]
	LateRegistration(ExtensionId),
}
