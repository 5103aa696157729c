use serde::{Deserialize, Serialize};
use url::Url;

/// Observable navigation status of the browser view.
///
/// Never mutated directly by the UI; it is recomputed from the session
/// history after every lifecycle callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub current_url: Option<Url>,
}

impl NavigationState {
    /// Host of the current URL, if any.
    pub fn host(&self) -> Option<&str> {
        self.current_url.as_ref().and_then(|u| u.host_str())
    }
}

/// Phase of a page load as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadPhase {
    /// Provisional navigation started.
    Started,
    /// The new document has been committed (or a same-document URL change).
    Committed,
    /// The page finished loading.
    Finished,
    /// Same-document URL replacement (`history.replaceState`); the current
    /// entry changes, no entry is added.
    Replaced,
}

/// A navigation lifecycle callback together with the URL the engine reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub phase: PageLoadPhase,
    pub url: Url,
}

impl NavigationEvent {
    pub fn started(url: Url) -> Self {
        Self { phase: PageLoadPhase::Started, url }
    }

    pub fn committed(url: Url) -> Self {
        Self { phase: PageLoadPhase::Committed, url }
    }

    pub fn finished(url: Url) -> Self {
        Self { phase: PageLoadPhase::Finished, url }
    }

    pub fn replaced(url: Url) -> Self {
        Self { phase: PageLoadPhase::Replaced, url }
    }

    /// Parses the engine's URL string; engines hand us strings, not `Url`s.
    pub fn parse(phase: PageLoadPhase, url: &str) -> Option<Self> {
        Url::parse(url).ok().map(|url| Self { phase, url })
    }
}

/// A history traversal the shell asked the engine to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Back,
    Forward,
    Reload,
}
