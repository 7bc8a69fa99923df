use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use quill_primitives::{HostSnapshot, Modifiers, Shortcut};

use super::*;
use crate::Contribution;

/// Minimal host: records hook invocations.
#[derive(Default)]
struct Host {
	init_log: Log,
}

#[derive(Default)]
struct Log(Mutex<Vec<String>>);

impl Log {
	fn push(&self, entry: impl Into<String>) {
		self.0.lock().unwrap().push(entry.into());
	}

	fn entries(&self) -> Vec<String> {
		self.0.lock().unwrap().clone()
	}
}

struct Probe {
	id: &'static str,
	activations: Arc<AtomicUsize>,
}

impl Probe {
	fn new(id: &'static str) -> Self {
		Self {
			id,
			activations: Arc::default(),
		}
	}
}

impl Extension<Host> for Probe {
	fn id(&self) -> ExtensionId {
		self.id.into()
	}

	fn initialize(&self, host: &Arc<Host>, contribution: Contribution) {
		host.init_log.push(self.id);
		let activations = Arc::clone(&self.activations);
		contribution.register_toolbar_item(
			ToolbarItem::new(self.id, "run", "play", move || {
				let activations = Arc::clone(&activations);
				async move {
					activations.fetch_add(1, Ordering::SeqCst);
				}
			})
			.with_shortcut(Shortcut::new('r', Modifiers::COMMAND))
			.with_focus_panel("TERMINAL"),
		);
	}
}

#[test]
fn duplicate_extension_is_rejected() {
	let mut manager = ExtensionManager::<Host>::new();
	manager.register(Probe::new("a")).unwrap();
	assert_eq!(
		manager.register(Probe::new("a")),
		Err(ExtensionError::Duplicate("a".into()))
	);
	assert_eq!(manager.extension_ids(), vec![ExtensionId::from("a")]);
}

#[test]
fn initializes_once_in_registration_order() {
	let mut manager = ExtensionManager::<Host>::new();
	for id in ["first", "second", "third"] {
		manager.register(Probe::new(id)).unwrap();
	}
	let host = Arc::new(Host::default());

	manager.initialize_all(&host).unwrap();
	assert_eq!(manager.initialize_all(&host), Err(ExtensionError::AlreadyInitialized));

	assert_eq!(host.init_log.entries(), vec!["first", "second", "third"]);
	assert_eq!(manager.contributions().toolbar.len(), 3);
}

#[test]
fn registration_after_initialization_is_rejected() {
	let mut manager = ExtensionManager::<Host>::new();
	manager.initialize_all(&Arc::new(Host::default())).unwrap();
	assert_eq!(
		manager.register(Probe::new("late")),
		Err(ExtensionError::LateRegistration("late".into()))
	);
}

#[test]
fn re_registering_an_item_under_one_identity_keeps_one_entry() {
	struct Twice;

	impl Extension<Host> for Twice {
		fn id(&self) -> ExtensionId {
			"twice".into()
		}

		fn initialize(&self, _host: &Arc<Host>, contribution: Contribution) {
			contribution.register_toolbar_item(ToolbarItem::new("twice", "run", "first", || async {}));
			contribution.register_toolbar_item(ToolbarItem::new("twice", "run", "second", || async {}));
		}
	}

	let mut manager = ExtensionManager::<Host>::new();
	manager.register(Twice).unwrap();
	manager.initialize_all(&Arc::new(Host::default())).unwrap();

	let items = manager.contributions().toolbar.all();
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].icon.as_str(), "second");
}

#[test]
fn surface_rescopes_foreign_ids() {
	struct Impostor;

	impl Extension<Host> for Impostor {
		fn id(&self) -> ExtensionId {
			"impostor".into()
		}

		fn initialize(&self, _host: &Arc<Host>, contribution: Contribution) {
			contribution.register_toolbar_item(ToolbarItem::new("someone-else", "run", "x", || async {}));
		}
	}

	let mut manager = ExtensionManager::<Host>::new();
	manager.register(Impostor).unwrap();
	manager.initialize_all(&Arc::new(Host::default())).unwrap();

	let items = manager.contributions().toolbar.all();
	assert_eq!(items[0].extension_id.as_str(), "impostor");
}

#[test]
fn extensions_can_register_lazily_after_init() {
	struct Lazy(Log, Mutex<Option<Contribution>>);

	impl Extension<Host> for Lazy {
		fn id(&self) -> ExtensionId {
			"lazy".into()
		}

		fn initialize(&self, _host: &Arc<Host>, contribution: Contribution) {
			self.0.push("init");
			*self.1.lock().unwrap() = Some(contribution);
		}
	}

	let lazy = Arc::new(Lazy(Default::default(), Default::default()));

	struct Shared(Arc<Lazy>);
	impl Extension<Host> for Shared {
		fn id(&self) -> ExtensionId {
			self.0.id()
		}

		fn initialize(&self, host: &Arc<Host>, contribution: Contribution) {
			self.0.initialize(host, contribution);
		}
	}

	let mut manager = ExtensionManager::<Host>::new();
	manager.register(Shared(Arc::clone(&lazy))).unwrap();
	manager.initialize_all(&Arc::new(Host::default())).unwrap();
	assert!(manager.contributions().toolbar.is_empty());

	let surface = lazy.1.lock().unwrap().clone().expect("surface kept");
	surface.register_panel_binding(PanelBinding::new("lazy", "out", "OUTPUT", "Output"));
	assert_eq!(manager.panel_bindings(&HostSnapshot::default()).count(), 1);
}

#[tokio::test]
async fn activation_by_identity_and_shortcut() {
	let probe = Probe::new("runner");
	let activations = Arc::clone(&probe.activations);

	let mut manager = ExtensionManager::<Host>::new();
	manager.register(probe).unwrap();
	manager.initialize_all(&Arc::new(Host::default())).unwrap();

	let snapshot = HostSnapshot::default();
	let activation = manager
		.activate(&snapshot, &"runner".into(), &"run".into())
		.expect("visible item");
	assert_eq!(activation.focus_panel.as_ref().map(|p| p.as_str()), Some("TERMINAL"));
	activation.future.await;

	manager
		.activate_shortcut(&snapshot, Shortcut::new('r', Modifiers::COMMAND))
		.expect("bound shortcut")
		.future
		.await;

	assert!(
		manager
			.activate_shortcut(&snapshot, Shortcut::new('r', Modifiers::CONTROL))
			.is_none()
	);
	assert!(manager.activate(&snapshot, &"runner".into(), &"missing".into()).is_none());
	assert_eq!(activations.load(Ordering::SeqCst), 2);
}

#[test]
fn hidden_items_cannot_be_activated() {
	struct Hidden;

	impl Extension<Host> for Hidden {
		fn id(&self) -> ExtensionId {
			"hidden".into()
		}

		fn initialize(&self, _host: &Arc<Host>, contribution: Contribution) {
			contribution.register_toolbar_item(
				ToolbarItem::new("hidden", "run", "x", || async {}).visible_when(|_| false),
			);
		}
	}

	let mut manager = ExtensionManager::<Host>::new();
	manager.register(Hidden).unwrap();
	manager.initialize_all(&Arc::new(Host::default())).unwrap();

	assert!(
		manager
			.activate(&HostSnapshot::default(), &"hidden".into(), &"run".into())
			.is_none()
	);
}
