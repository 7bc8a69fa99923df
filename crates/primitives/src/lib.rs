//! Core types shared by the host, the contribution registries and extensions.

/// Boxed future alias for activation callbacks.
pub mod future;
/// Identifier newtypes.
pub mod ids;
/// Keyboard shortcut and modifier types.
pub mod key;
/// Read-only host view for visibility predicates.
pub mod snapshot;

pub use future::BoxFutureStatic;
pub use ids::{ExtensionId, Icon, ItemKey, LanguageId, PanelId};
pub use key::{Modifiers, Shortcut, ShortcutParseError};
pub use snapshot::{EditorView, HostSnapshot};
