//! WebView shell using `wry` + `tao`.
//!
//! Architecture:
//! - One window, one webview, owned by `NavigationStore` through `WryEngine`.
//! - `with_initialization_script` installs the IPC bridge (and the toolbar in
//!   desktop presentation) on every document.
//! - Page-load callbacks, IPC messages, new-window requests and voice commands
//!   are all sent through the `EventLoopProxy`; only the event loop mutates
//!   the store and the command center.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, info, warn};
use url::Url;
use wry::{WebContext, WebView, WebViewBuilder};

use crate::app::App;
use crate::intent_server::IntentServer;
use crate::ipc::{self, ShellAction};
use crate::managers::navigation_store::{BrowserEngine, NavigationStore, NavigationStoreTrait};
use crate::platform::{self, NativeBridge};
use crate::services::command_center::CommandCenterTrait;
use crate::services::desktop_actions::{ActionOutcome, DesktopActions};
use crate::services::voice_intent::CommandSink;
use crate::types::command::VoiceCommand;
use crate::types::errors::{EngineError, IntentError, ShellError};
use crate::types::navigation::{NavigationEvent, PageLoadPhase};

#[derive(Debug)]
enum UserEvent {
    PageLoad(PageLoadPhase, String),
    Ipc(ShellAction),
    /// A page asked for a new window; it is loaded in this view instead.
    NewWindow(String),
    Voice(VoiceCommand),
    /// Back from the credential manager: refocus and reload.
    ReturnFromCredentials,
}

/// `BrowserEngine` backed by a wry webview. wry has no history API, so
/// traversals go through the page's own `history` object.
pub struct WryEngine {
    webview: WebView,
}

impl WryEngine {
    fn eval(&self, script: &str) -> Result<(), EngineError> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| EngineError::ScriptFailed(e.to_string()))
    }
}

impl BrowserEngine for WryEngine {
    fn load_url(&self, url: &Url) -> Result<(), EngineError> {
        self.webview
            .load_url(url.as_str())
            .map_err(|e| EngineError::NavigationFailed(format!("{}: {}", url, e)))
    }

    fn go_back(&self) -> Result<(), EngineError> {
        self.eval("history.back()")
    }

    fn go_forward(&self) -> Result<(), EngineError> {
        self.eval("history.forward()")
    }

    fn reload(&self) -> Result<(), EngineError> {
        self.webview
            .reload()
            .map_err(|e| EngineError::NavigationFailed(e.to_string()))
    }
}

/// Hands voice commands to the event loop.
struct ProxySink(Mutex<EventLoopProxy<UserEvent>>);

impl CommandSink for ProxySink {
    fn deliver(&self, command: VoiceCommand) -> Result<(), IntentError> {
        let proxy = self
            .0
            .lock()
            .map_err(|e| IntentError::DeliveryFailed(e.to_string()))?;
        proxy
            .send_event(UserEvent::Voice(command))
            .map_err(|e| IntentError::DeliveryFailed(e.to_string()))
    }
}

struct Shell {
    app: App,
    store: NavigationStore<WryEngine>,
    actions: DesktopActions<NativeBridge>,
    window: Window,
    proxy: EventLoopProxy<UserEvent>,
    /// The bridge script reported `ui_ready` for the current document.
    page_ready: bool,
}

impl Shell {
    fn eval(&self, script: &str) {
        if let Err(e) = self.store.engine().eval(script) {
            debug!(error = %e, "script evaluation failed");
        }
    }

    fn push_nav_state(&self) {
        self.eval(&ipc::nav_update_script(self.store.state()));
    }

    fn try_deliver_command(&self) {
        if !self.page_ready || self.store.is_loading() {
            return;
        }
        if let Some(cmd) = self.app.command_center.pending() {
            debug!(id = %cmd.id, "delivering voice command to page");
            self.eval(&ipc::deliver_command_script(cmd));
        }
    }

    fn on_page_load(&mut self, phase: PageLoadPhase, url: &str) {
        if phase == PageLoadPhase::Started {
            self.page_ready = false;
        }
        let Some(event) = NavigationEvent::parse(phase, url) else {
            debug!(url, "ignoring page load for unparseable URL");
            return;
        };
        if self.store.apply(event).is_some() {
            self.push_nav_state();
        }
        if phase == PageLoadPhase::Finished {
            // Documents restored from the back/forward cache never send ui_ready.
            self.page_ready = true;
            self.push_nav_state();
            self.try_deliver_command();
        }
    }

    fn report(&self, outcome: ActionOutcome) {
        let message = match outcome {
            ActionOutcome::Copied(_) => "Link copied".to_string(),
            ActionOutcome::CredentialManagerOpened { host: Some(host), .. } => {
                format!("Copied {}; paste it into the search field", host)
            }
            ActionOutcome::CredentialManagerUnavailable { .. } => {
                "No password manager found".to_string()
            }
            _ => return,
        };
        self.eval(&ipc::toast_script(&message));
    }

    fn on_action(&mut self, action: ShellAction) {
        let result = match action {
            ShellAction::UiReady => {
                self.page_ready = true;
                self.push_nav_state();
                self.try_deliver_command();
                Ok(())
            }
            ShellAction::Back => self.store.go_back(),
            ShellAction::Forward => self.store.go_forward(),
            ShellAction::Reload => self.store.reload(),
            ShellAction::Share => {
                let outcome = self.actions.share_current_url(self.store.state());
                self.report(outcome);
                Ok(())
            }
            ShellAction::OpenInBrowser => {
                self.actions
                    .open_in_browser(self.store.state(), self.store.start_url());
                Ok(())
            }
            ShellAction::OpenCredentials => {
                let outcome = self
                    .actions
                    .open_credential_manager(self.store.state(), self.store.start_url());
                let opened = matches!(outcome, ActionOutcome::CredentialManagerOpened { .. });
                self.report(outcome);
                if opened {
                    self.schedule_return(self.app.settings().credentials.return_delay_ms);
                }
                Ok(())
            }
            ShellAction::UrlChanged { .. } => {
                if let Some(event) = action.navigation_event() {
                    if self.store.apply(event).is_some() {
                        self.push_nav_state();
                    }
                }
                Ok(())
            }
            ShellAction::CommandDelivered { id, delivered } => {
                if self.app.command_center.pending().map(|c| c.id) == Some(id) {
                    if let Some(cmd) = self.app.command_center.consume() {
                        if delivered {
                            info!(id = %cmd.id, "voice command delivered");
                        } else {
                            warn!(id = %cmd.id, "page has no input for voice command");
                            self.eval(&ipc::toast_script(&format!("Couldn't place: {}", cmd.text)));
                        }
                    }
                }
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "toolbar action failed");
        }
    }

    fn on_voice(&mut self, command: VoiceCommand) {
        self.app.command_center.store(command);
        self.window.set_visible(true);
        self.window.set_focus();
        self.try_deliver_command();
    }

    fn schedule_return(&self, delay_ms: u64) {
        let proxy = self.proxy.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(delay_ms));
            let _ = proxy.send_event(UserEvent::ReturnFromCredentials);
        });
    }

    fn on_return_from_credentials(&mut self) {
        self.window.set_focus();
        let url = self.store.current_or_start_url().to_string();
        if let Err(e) = self.store.load_url(&url) {
            warn!(error = %e, "reload after credential manager failed");
        }
    }
}

fn build_webview(
    window: &Window,
    app: &App,
    web_context: &mut WebContext,
    proxy: &EventLoopProxy<UserEvent>,
) -> Result<WebView, ShellError> {
    let settings = app.settings();
    let init_script = ipc::initialization_script(settings.general.presentation);

    let load_proxy = proxy.clone();
    let ipc_proxy = proxy.clone();
    let nw_proxy = proxy.clone();
    let open_windows = settings.webview.javascript_can_open_windows;

    let builder = WebViewBuilder::with_web_context(web_context)
        .with_initialization_script(&init_script)
        .with_back_forward_navigation_gestures(settings.webview.back_forward_gestures)
        .with_devtools(cfg!(debug_assertions))
        // Every navigation is allowed.
        .with_navigation_handler(|_url| true)
        .with_on_page_load_handler(move |event, url| {
            let phase = match event {
                wry::PageLoadEvent::Started => PageLoadPhase::Started,
                wry::PageLoadEvent::Finished => PageLoadPhase::Finished,
            };
            let _ = load_proxy.send_event(UserEvent::PageLoad(phase, url));
        })
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            if let Some(action) = ipc::parse_message(msg.body()) {
                let _ = ipc_proxy.send_event(UserEvent::Ipc(action));
            }
        })
        .with_new_window_req_handler(move |url, _features| {
            if open_windows && (url.starts_with("http://") || url.starts_with("https://")) {
                let _ = nw_proxy.send_event(UserEvent::NewWindow(url));
            }
            wry::NewWindowResponse::Deny
        });

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or_else(|| {
            EngineError::NavigationFailed("window has no GTK container".to_string())
        })?;
        builder
            .build_gtk(vbox)
            .map_err(|e| EngineError::NavigationFailed(e.to_string()))?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder
        .build(window)
        .map_err(|e| EngineError::NavigationFailed(e.to_string()))?;

    Ok(webview)
}

/// Builds the window, the webview and the intent server, then runs the
/// event loop until the window closes.
pub fn run(app: App) -> Result<(), ShellError> {
    app.startup();

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let win = &app.settings().window;
    let window = WindowBuilder::new()
        .with_title(win.title.as_str())
        .with_inner_size(LogicalSize::new(win.width, win.height))
        .with_min_inner_size(LogicalSize::new(win.min_width, win.min_height))
        .build(&event_loop)
        .map_err(|e| EngineError::NavigationFailed(format!("window: {}", e)))?;

    let mut web_context = WebContext::new(Some(platform::get_data_dir()));
    let webview = build_webview(&window, &app, &mut web_context, &proxy)?;

    let intent_server = if app.settings().voice.enabled {
        let voice = &app.settings().voice;
        let sink: Arc<dyn CommandSink> = Arc::new(ProxySink(Mutex::new(proxy.clone())));
        match IntentServer::start(
            &voice.listen_addr,
            app.voice_intent(),
            sink,
            voice.max_requests_per_second,
        ) {
            Ok(server) => Some(server),
            Err(e) => {
                warn!(error = %e, "voice intent surface unavailable");
                None
            }
        }
    } else {
        None
    };

    let store = NavigationStore::new(
        WryEngine { webview },
        app.start_url().clone(),
        app.settings().webview.max_history_entries,
    );
    let actions = app.desktop_actions();

    let mut shell = Shell {
        app,
        store,
        actions,
        window,
        proxy,
        page_ready: false,
    };
    let mut intent_server = intent_server;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // The profile directory must outlive the webview.
        let _ = &web_context;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                if let Some(server) = intent_server.take() {
                    server.shutdown();
                }
                shell.app.shutdown();
                *control_flow = ControlFlow::Exit;
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::PageLoad(phase, url) => shell.on_page_load(phase, &url),
                UserEvent::Ipc(action) => shell.on_action(action),
                UserEvent::NewWindow(url) => {
                    info!(url = %url, "new window request loaded in place");
                    if let Err(e) = shell.store.load_url(&url) {
                        warn!(error = %e, "new window navigation failed");
                    }
                }
                UserEvent::Voice(command) => shell.on_voice(command),
                UserEvent::ReturnFromCredentials => shell.on_return_from_credentials(),
            },

            _ => {}
        }
    })
}
