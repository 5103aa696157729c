//! Unit tests for the NavigationStore.
//!
//! A recording engine stands in for the webview. Lifecycle callbacks are fed
//! in the order a real engine reports them: started, committed, finished.

use std::cell::RefCell;
use std::rc::Rc;

use blablador::ipc::parse_message;
use blablador::managers::navigation_store::{BrowserEngine, NavigationStore, NavigationStoreTrait};
use blablador::types::errors::EngineError;
use blablador::types::navigation::{NavigationEvent, NavigationState};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Load(String),
    Back,
    Forward,
    Reload,
}

#[derive(Clone, Default)]
struct RecordingEngine {
    calls: Rc<RefCell<Vec<Call>>>,
    fail: Rc<RefCell<bool>>,
}

impl RecordingEngine {
    fn record(&self, call: Call) -> Result<(), EngineError> {
        if *self.fail.borrow() {
            return Err(EngineError::NavigationFailed("engine unavailable".to_string()));
        }
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl BrowserEngine for RecordingEngine {
    fn load_url(&self, url: &Url) -> Result<(), EngineError> {
        self.record(Call::Load(url.to_string()))
    }
    fn go_back(&self) -> Result<(), EngineError> {
        self.record(Call::Back)
    }
    fn go_forward(&self) -> Result<(), EngineError> {
        self.record(Call::Forward)
    }
    fn reload(&self) -> Result<(), EngineError> {
        self.record(Call::Reload)
    }
}

const START: &str = "https://staging.helmholtz-blablador.fz-juelich.de/";

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn setup() -> (NavigationStore<RecordingEngine>, RecordingEngine) {
    let engine = RecordingEngine::default();
    let store = NavigationStore::new(engine.clone(), url(START), 100);
    (store, engine)
}

/// Feeds a full page load for `target`.
fn load(store: &mut NavigationStore<RecordingEngine>, target: &str) {
    store.apply(NavigationEvent::started(url(target)));
    store.apply(NavigationEvent::committed(url(target)));
    store.apply(NavigationEvent::finished(url(target)));
}

// ─── Startup ───

#[test]
fn test_new_loads_start_url() {
    let (store, engine) = setup();

    assert_eq!(*engine.calls.borrow(), vec![Call::Load(START.to_string())]);
    assert_eq!(*store.state(), NavigationState::default());
    assert!(store.is_loading());
}

#[test]
fn test_start_url_current_after_first_finish() {
    let (mut store, _) = setup();
    load(&mut store, START);

    let state = store.state();
    assert_eq!(state.current_url.as_ref().map(Url::as_str), Some(START));
    assert!(!state.can_go_back);
    assert!(!state.can_go_forward);
    assert!(!store.is_loading());
}

#[test]
fn test_failed_initial_load_leaves_store_usable() {
    let engine = RecordingEngine::default();
    *engine.fail.borrow_mut() = true;
    let mut store = NavigationStore::new(engine.clone(), url(START), 100);

    assert!(!store.is_loading());
    assert_eq!(store.current_or_start_url().as_str(), START);

    *engine.fail.borrow_mut() = false;
    store.reload().unwrap();
    assert_eq!(*engine.calls.borrow(), vec![Call::Reload]);
}

// ─── Back / Forward ───

#[test]
fn test_can_go_back_only_after_second_page() {
    let (mut store, _) = setup();
    load(&mut store, START);
    assert!(!store.state().can_go_back);

    load(&mut store, "https://staging.helmholtz-blablador.fz-juelich.de/c/abc");
    assert!(store.state().can_go_back);
    assert!(!store.state().can_go_forward);
}

#[test]
fn test_back_then_forward_round_trip() {
    let (mut store, engine) = setup();
    let chat = "https://staging.helmholtz-blablador.fz-juelich.de/c/abc";
    load(&mut store, START);
    load(&mut store, chat);

    store.go_back().unwrap();
    load(&mut store, START);
    assert_eq!(store.state().current_url.as_ref().map(Url::as_str), Some(START));
    assert!(!store.state().can_go_back);
    assert!(store.state().can_go_forward);

    store.go_forward().unwrap();
    load(&mut store, chat);
    assert_eq!(store.state().current_url.as_ref().map(Url::as_str), Some(chat));
    assert!(store.state().can_go_back);
    assert!(!store.state().can_go_forward);

    let calls = engine.calls.borrow();
    assert_eq!(&calls[1..], &[Call::Back, Call::Forward]);
}

#[test]
fn test_back_without_history_is_noop() {
    let (mut store, engine) = setup();
    load(&mut store, START);

    store.go_back().unwrap();
    store.go_forward().unwrap();

    assert_eq!(engine.calls.borrow().len(), 1, "Only the initial load reaches the engine");
    assert!(store.history().pending().is_none());
}

#[test]
fn test_new_navigation_drops_forward_entries() {
    let (mut store, _) = setup();
    load(&mut store, START);
    load(&mut store, "https://example.org/a");
    store.go_back().unwrap();
    load(&mut store, START);
    assert!(store.state().can_go_forward);

    load(&mut store, "https://example.org/b");

    assert!(!store.state().can_go_forward);
    assert!(store.state().can_go_back);
    assert_eq!(store.history().len(), 2);
}

#[test]
fn test_engine_failure_cancels_pending_traversal() {
    let (mut store, engine) = setup();
    load(&mut store, START);
    load(&mut store, "https://example.org/a");

    *engine.fail.borrow_mut() = true;
    assert!(store.go_back().is_err());
    assert!(store.history().pending().is_none());
}

// ─── Reload ───

#[test]
fn test_reload_keeps_flags() {
    let (mut store, _) = setup();
    load(&mut store, START);
    load(&mut store, "https://example.org/a");
    let before = store.state().clone();

    store.reload().unwrap();
    store.apply(NavigationEvent::started(url("https://example.org/a")));
    store.apply(NavigationEvent::committed(url("https://example.org/a")));
    let changed = store.apply(NavigationEvent::finished(url("https://example.org/a")));

    assert!(changed.is_none(), "A plain reload must not report a state change");
    assert_eq!(*store.state(), before);
    assert_eq!(store.history().len(), 2);
}

#[test]
fn test_reload_redirect_replaces_entry() {
    let (mut store, _) = setup();
    load(&mut store, START);
    load(&mut store, "https://example.org/a");

    store.reload().unwrap();
    load(&mut store, "https://example.org/login");

    assert_eq!(store.history().len(), 2);
    assert_eq!(
        store.state().current_url.as_ref().map(Url::as_str),
        Some("https://example.org/login")
    );
}

// ─── load_url / apply ───

#[test]
fn test_load_url_rejects_garbage() {
    let (mut store, engine) = setup();
    let result = store.load_url("not a url");

    assert!(matches!(result, Err(EngineError::InvalidUrl(_))));
    assert_eq!(engine.calls.borrow().len(), 1);
}

#[test]
fn test_load_url_forwards_to_engine() {
    let (mut store, engine) = setup();
    store.load_url("https://example.org/x").unwrap();

    assert_eq!(
        engine.calls.borrow().last(),
        Some(&Call::Load("https://example.org/x".to_string()))
    );
}

#[test]
fn test_apply_reports_only_changes() {
    let (mut store, _) = setup();

    assert!(store.apply(NavigationEvent::started(url(START))).is_none());
    let first = store.apply(NavigationEvent::committed(url(START)));
    assert!(first.is_some());
    assert!(store.apply(NavigationEvent::finished(url(START))).is_none());
}

#[test]
fn test_same_document_url_change_is_tracked() {
    let (mut store, _) = setup();
    load(&mut store, START);

    let changed = store.apply(NavigationEvent::committed(url(
        "https://staging.helmholtz-blablador.fz-juelich.de/c/new",
    )));

    let state = changed.expect("pushState should change the state");
    assert!(state.can_go_back);
    assert_eq!(state.host(), Some("staging.helmholtz-blablador.fz-juelich.de"));
}

/// An SPA normalising its URL with `replaceState` after load must not gain
/// a back entry.
#[test]
fn test_replace_state_keeps_single_entry() {
    let (mut store, _) = setup();
    load(&mut store, START);

    let action = parse_message(&format!(
        r#"{{"cmd":"url_changed","url":"{}auth","replace":true}}"#,
        START
    ))
    .unwrap();
    let changed = store.apply(action.navigation_event().unwrap());

    let state = changed.expect("the current URL changed");
    assert!(!state.can_go_back, "replaceState must not create a back entry");
    assert!(!state.can_go_forward);
    assert_eq!(state.current_url.as_ref().map(Url::as_str), Some(format!("{}auth", START).as_str()));
    assert_eq!(store.history().len(), 1);
}

#[test]
fn test_replace_state_after_push_keeps_back_target() {
    let (mut store, _) = setup();
    load(&mut store, START);
    store.apply(NavigationEvent::committed(url("https://example.org/c/1")));
    store.apply(NavigationEvent::replaced(url("https://example.org/c/1?tab=2")));

    assert!(store.state().can_go_back);
    assert_eq!(store.history().len(), 2);

    store.go_back().unwrap();
    load(&mut store, START);
    assert!(!store.state().can_go_back);
    assert!(store.state().can_go_forward);
    assert_eq!(
        store.history().entries()[1].as_str(),
        "https://example.org/c/1?tab=2"
    );
}

#[test]
fn test_current_or_start_url_falls_back() {
    let (mut store, _) = setup();
    assert_eq!(store.current_or_start_url().as_str(), START);

    load(&mut store, "https://example.org/a");
    assert_eq!(store.current_or_start_url().as_str(), "https://example.org/a");
    assert_eq!(store.start_url().as_str(), START);
}
