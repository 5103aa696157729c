//! Browser-view wrapper.
//!
//! Owns the single engine instance, forwards back/forward/reload/load
//! requests to it, and recomputes the observable `NavigationState` after
//! every lifecycle callback. The store is only ever touched from the UI
//! thread; callbacks from the engine reach it through the event loop.

use tracing::{debug, info, warn};
use url::Url;

use crate::managers::session_history::SessionHistory;
use crate::types::errors::EngineError;
use crate::types::navigation::{NavigationEvent, NavigationState, PageLoadPhase, Traversal};

/// The operations the shell needs from an embedded browser engine.
pub trait BrowserEngine {
    fn load_url(&self, url: &Url) -> Result<(), EngineError>;
    fn go_back(&self) -> Result<(), EngineError>;
    fn go_forward(&self) -> Result<(), EngineError>;
    fn reload(&self) -> Result<(), EngineError>;
}

/// Trait defining the navigation store interface exposed to the UI.
pub trait NavigationStoreTrait {
    fn go_back(&mut self) -> Result<(), EngineError>;
    fn go_forward(&mut self) -> Result<(), EngineError>;
    fn reload(&mut self) -> Result<(), EngineError>;
    fn load_url(&mut self, url: &str) -> Result<(), EngineError>;
    fn apply(&mut self, event: NavigationEvent) -> Option<NavigationState>;
    fn state(&self) -> &NavigationState;
    fn is_loading(&self) -> bool;
    fn start_url(&self) -> &Url;
    fn current_or_start_url(&self) -> &Url;
}

pub struct NavigationStore<E: BrowserEngine> {
    engine: E,
    history: SessionHistory,
    state: NavigationState,
    start_url: Url,
    loading: bool,
}

impl<E: BrowserEngine> NavigationStore<E> {
    /// Wraps `engine` and immediately loads the start URL.
    ///
    /// A failed initial load is logged and leaves the store empty; the user
    /// can still reload.
    pub fn new(engine: E, start_url: Url, max_history_entries: usize) -> Self {
        let mut store = Self::attach(engine, start_url, max_history_entries);
        let start = store.start_url.clone();
        if let Err(e) = store.engine.load_url(&start) {
            warn!(url = %start, error = %e, "initial load failed");
            store.loading = false;
        }
        store
    }

    /// Wraps an engine that is already loading `start_url` on its own.
    pub fn attach(engine: E, start_url: Url, max_history_entries: usize) -> Self {
        Self {
            engine,
            history: SessionHistory::new(max_history_entries),
            state: NavigationState::default(),
            start_url,
            loading: true,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    fn traverse(
        &mut self,
        traversal: Traversal,
        run: impl FnOnce(&E) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        self.history.begin(traversal);
        if let Err(e) = run(&self.engine) {
            self.history.cancel_pending();
            return Err(e);
        }
        Ok(())
    }
}

impl<E: BrowserEngine> NavigationStoreTrait for NavigationStore<E> {
    fn go_back(&mut self) -> Result<(), EngineError> {
        if !self.state.can_go_back {
            debug!("go_back ignored: nothing to go back to");
            return Ok(());
        }
        self.traverse(Traversal::Back, |e| e.go_back())
    }

    fn go_forward(&mut self) -> Result<(), EngineError> {
        if !self.state.can_go_forward {
            debug!("go_forward ignored: nothing to go forward to");
            return Ok(());
        }
        self.traverse(Traversal::Forward, |e| e.go_forward())
    }

    fn reload(&mut self) -> Result<(), EngineError> {
        self.traverse(Traversal::Reload, |e| e.reload())
    }

    fn load_url(&mut self, url: &str) -> Result<(), EngineError> {
        let parsed = Url::parse(url).map_err(|e| EngineError::InvalidUrl(format!("{url}: {e}")))?;
        self.history.cancel_pending();
        self.engine.load_url(&parsed)
    }

    /// Processes one lifecycle callback. Returns the new snapshot when the
    /// observable state changed.
    fn apply(&mut self, event: NavigationEvent) -> Option<NavigationState> {
        match event.phase {
            PageLoadPhase::Started => {
                self.loading = true;
            }
            PageLoadPhase::Committed => {
                self.history.commit(&event.url);
            }
            PageLoadPhase::Finished => {
                self.history.commit(&event.url);
                self.loading = false;
            }
            PageLoadPhase::Replaced => {
                self.history.replace_current(&event.url);
            }
        }

        let next = self.history.snapshot();
        if next == self.state {
            return None;
        }
        info!(
            url = next.current_url.as_ref().map(Url::as_str).unwrap_or(""),
            can_go_back = next.can_go_back,
            can_go_forward = next.can_go_forward,
            "navigation state changed"
        );
        self.state = next.clone();
        Some(next)
    }

    fn state(&self) -> &NavigationState {
        &self.state
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn start_url(&self) -> &Url {
        &self.start_url
    }

    fn current_or_start_url(&self) -> &Url {
        self.state.current_url.as_ref().unwrap_or(&self.start_url)
    }
}
