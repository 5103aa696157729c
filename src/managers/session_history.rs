//! Mirror of the engine's back/forward list.
//!
//! wry reports page loads but does not expose the engine's history, so the
//! shell keeps its own list of committed URLs. Traversals the shell starts
//! are recorded as pending so the next commit can be classified.

use tracing::debug;
use url::Url;

use crate::types::navigation::{NavigationState, Traversal};

/// How a commit was applied to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// A new entry was pushed.
    Push,
    /// The current entry's URL was replaced (redirect after reload).
    Replace,
    Back,
    Forward,
    /// Same URL as the current entry.
    Unchanged,
}

/// Committed URLs plus the current position.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<Url>,
    current_index: usize,
    pending: Option<Traversal>,
    max_entries: usize,
}

impl SessionHistory {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            current_index: 0,
            pending: None,
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_url(&self) -> Option<&Url> {
        self.entries.get(self.current_index)
    }

    pub fn entries(&self) -> &[Url] {
        &self.entries
    }

    pub fn pending(&self) -> Option<Traversal> {
        self.pending
    }

    pub fn can_go_back(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    /// Records a traversal the shell asked the engine to perform.
    pub fn begin(&mut self, traversal: Traversal) {
        self.pending = Some(traversal);
    }

    /// Drops a pending traversal the engine never acted on.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn previous(&self) -> Option<&Url> {
        self.current_index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }

    fn next(&self) -> Option<&Url> {
        self.entries.get(self.current_index + 1)
    }

    /// Applies a committed URL to the history.
    pub fn commit(&mut self, url: &Url) -> CommitKind {
        let pending = self.pending.take();

        let kind = match pending {
            Some(Traversal::Back) if self.previous() == Some(url) => {
                self.current_index -= 1;
                CommitKind::Back
            }
            Some(Traversal::Forward) if self.next() == Some(url) => {
                self.current_index += 1;
                CommitKind::Forward
            }
            Some(Traversal::Reload) => {
                if self.current_url() == Some(url) {
                    CommitKind::Unchanged
                } else if let Some(entry) = self.entries.get_mut(self.current_index) {
                    *entry = url.clone();
                    CommitKind::Replace
                } else {
                    self.push(url.clone());
                    CommitKind::Push
                }
            }
            _ => self.classify(url),
        };

        debug!(
            url = %url,
            ?kind,
            index = self.current_index,
            len = self.entries.len(),
            "history commit"
        );
        kind
    }

    /// Commit without a matching pending traversal. Adjacent URLs are
    /// treated as traversals started by the page or a gesture.
    fn classify(&mut self, url: &Url) -> CommitKind {
        if self.current_url() == Some(url) {
            CommitKind::Unchanged
        } else if self.previous() == Some(url) {
            self.current_index -= 1;
            CommitKind::Back
        } else if self.next() == Some(url) {
            self.current_index += 1;
            CommitKind::Forward
        } else {
            self.push(url.clone());
            CommitKind::Push
        }
    }

    /// Swaps the current entry's URL in place, as `history.replaceState`
    /// does. An empty history gets its first entry.
    pub fn replace_current(&mut self, url: &Url) -> CommitKind {
        let kind = match self.entries.get_mut(self.current_index) {
            Some(entry) if entry == url => CommitKind::Unchanged,
            Some(entry) => {
                *entry = url.clone();
                CommitKind::Replace
            }
            None => {
                self.push(url.clone());
                CommitKind::Push
            }
        };
        debug!(url = %url, ?kind, index = self.current_index, "history replace");
        kind
    }

    fn push(&mut self, url: Url) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.current_index + 1);
        }
        self.entries.push(url);
        if self.entries.len() > self.max_entries {
            let overflow = self.entries.len() - self.max_entries;
            self.entries.drain(..overflow);
        }
        self.current_index = self.entries.len() - 1;
    }

    /// Snapshot used as the observable navigation state.
    pub fn snapshot(&self) -> NavigationState {
        NavigationState {
            can_go_back: self.can_go_back(),
            can_go_forward: self.can_go_forward(),
            current_url: self.current_url().cloned(),
        }
    }
}
