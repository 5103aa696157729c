// Blablador managers
// Managers own the browser-view state: session history mirror and navigation store.

pub mod navigation_store;
pub mod session_history;
