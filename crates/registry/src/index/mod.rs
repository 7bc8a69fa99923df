//! Copy-on-write contribution registry with atomic publication.
//!
//! # Invariants
//!
//! - At most one entry exists per `(extension id, item key)`.
//! - Re-registration replaces the entry in its original slot, so render order
//!   stays the order of first registration.
//! - Readers never block writers: every read works on a published snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;
use quill_primitives::{ExtensionId, HostSnapshot, ItemKey};
use rustc_hash::FxHashMap;

use crate::item::{Contributed, ContributionKey};


/// Result of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Key was new; item appended.
	InsertedNew,
	/// Key existed; the previous item was replaced in place.
	ReplacedExisting,
}

struct Entries<T> {
	items: Vec<Arc<T>>,
	by_key: FxHashMap<ContributionKey, usize>,
}

impl<T> Default for Entries<T> {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			by_key: FxHashMap::default(),
		}
	}
}

/// Registry of one contribution category (toolbar, panels, ...).
pub struct ContributionRegistry<T: Contributed> {
	label: &'static str,
	snap: ArcSwap<Entries<T>>,
}

impl<T: Contributed> ContributionRegistry<T> {
	/// Creates an empty registry. `label` names the category in logs.
	pub fn new(label: &'static str) -> Self {
		Self {
			label,
			snap: ArcSwap::from_pointee(Entries::default()),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Inserts `item`, replacing any item with the same identity.
	pub fn register(&self, item: T) -> InsertAction {
		let key = item.contribution_key();
		let item = Arc::new(item);

		loop {
			let old = self.snap.load_full();
			let mut items = old.items.clone();
			let mut by_key = old.by_key.clone();

			let action = match by_key.get(&key) {
				Some(&slot) => {
					items[slot] = Arc::clone(&item);
					InsertAction::ReplacedExisting
				}
				None => {
					by_key.insert(key.clone(), items.len());
					items.push(Arc::clone(&item));
					InsertAction::InsertedNew
				}
			};

			let new = Arc::new(Entries { items, by_key });
			let prev = self.snap.compare_and_swap(&old, new);
			if Arc::ptr_eq(&prev, &old) {
				tracing::debug!(
					category = self.label,
					extension = %key.0,
					key = %key.1,
					?action,
					"contribution registered"
				);
				return action;
			}
		}
	}

	/// Looks up an item by identity.
	pub fn get(&self, extension_id: &ExtensionId, key: &ItemKey) -> Option<Arc<T>> {
		let snap = self.snap.load();
		let slot = *snap.by_key.get(&(extension_id.clone(), key.clone()))?;
		Some(Arc::clone(&snap.items[slot]))
	}

	/// Returns every item in registration order, visible or not.
	pub fn all(&self) -> Vec<Arc<T>> {
		self.snap.load().items.clone()
	}

	/// Returns the items whose predicate holds for `snapshot`.
	///
	/// The sequence is lazy: predicates run as the iterator advances. It is
	/// pinned to the registry state at call time and can be restarted.
	pub fn visible_items<'s>(&self, snapshot: &'s HostSnapshot) -> VisibleItems<'s, T> {
		VisibleItems {
			entries: self.snap.load_full(),
			snapshot,
			pos: 0,
		}
	}

	pub fn len(&self) -> usize {
		self.snap.load().items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Lazy iterator over visible items. See [`ContributionRegistry::visible_items`].
pub struct VisibleItems<'s, T> {
	entries: Arc<Entries<T>>,
	snapshot: &'s HostSnapshot,
	pos: usize,
}

impl<T> VisibleItems<'_, T> {
	/// Rewinds to the first item of the pinned registry state.
	pub fn restart(&mut self) {
		self.pos = 0;
	}
}

impl<T> Clone for VisibleItems<'_, T> {
	fn clone(&self) -> Self {
		Self {
			entries: Arc::clone(&self.entries),
			snapshot: self.snapshot,
			pos: self.pos,
		}
	}
}

impl<T: Contributed> Iterator for VisibleItems<'_, T> {
	type Item = Arc<T>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(item) = self.entries.items.get(self.pos) {
			self.pos += 1;
			if item.is_visible(self.snapshot) {
				return Some(Arc::clone(item));
			}
		}
		None
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(self.entries.items.len().saturating_sub(self.pos)))
	}
}
