//! Extension lifecycle and contribution registries.
//!
//! Extensions are statically linked capability providers. At startup the
//! [`ExtensionManager`] calls each one's [`Extension::initialize`] hook with a
//! [`Contribution`] surface scoped to its identity; through it the extension
//! files toolbar items and panel bindings into the shared
//! [`ContributionRegistry`] instances the host renders from.
//!
//! ```text
//! ExtensionManager
//! ├── extensions: Vec<Box<dyn Extension<H>>>   (registration order)
//! └── contributions: Arc<Contributions>
//!     ├── toolbar: ContributionRegistry<ToolbarItem>
//!     └── panels:  ContributionRegistry<PanelBinding>
//! ```

mod error;
mod extension;
mod index;
mod item;
mod manager;
mod panel;
mod surface;
mod toolbar;

pub use error::ExtensionError;
pub use extension::Extension;
pub use index::{ContributionRegistry, InsertAction, VisibleItems};
pub use item::{ActivateFn, Contributed, ContributionKey, VisibilityFn};
pub use manager::{Activation, ExtensionManager};
pub use panel::PanelBinding;
pub use surface::{Contribution, Contributions};
pub use toolbar::ToolbarItem;
