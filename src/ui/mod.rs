//! Blablador UI layer.
//!
//! Uses `wry` for the embedded browser view:
//! - macOS: WKWebView
//! - Linux: WebKitGTK
//! - Windows: WebView2
//!
//! The only chrome is an optional toolbar overlay injected into the page.
//! Every engine callback is forwarded to the tao event loop, which is the
//! single writer of UI state.

pub mod webview_app;
