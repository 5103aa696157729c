//! Blablador: a minimal native shell around the Blablador web front-end.
//!
//! Entry point: loads settings, starts logging and opens the browser window.
//! When built without the `gui` feature, prints the resolved configuration
//! and the voice intent description instead.

use blablador::app::App;
use blablador::cli;
use blablador::logging;
use blablador::types::errors::ShellError;

fn main() {
    let args = cli::parse();

    let app = match App::new(args.config.clone(), args.url.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            logging::init(args.log_level.as_deref());
            tracing::error!("Failed to initialize Blablador: {e}");
            std::process::exit(1);
        }
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| app.settings().logging.level.clone());
    logging::init(Some(&level));

    tracing::info!("Blablador v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }

    if let Err(e) = run(app) {
        tracing::error!("Blablador exited with an error: {e}");
        std::process::exit(1);
    }
}

#[cfg(feature = "gui")]
fn run(app: App) -> Result<(), ShellError> {
    blablador::ui::webview_app::run(app)
}

#[cfg(not(feature = "gui"))]
fn run(app: App) -> Result<(), ShellError> {
    use blablador::services::settings_engine::SettingsEngineTrait;

    app.startup();
    println!("Blablador v{} (built without GUI)", env!("CARGO_PKG_VERSION"));
    println!("  start URL:    {}", app.start_url());
    println!("  config file:  {}", app.settings_engine.get_config_path());
    let intent = app.voice_intent();
    println!("  voice intent: {}", intent.definition().title);
    for phrase in intent.phrases() {
        println!("    \"{}\"", phrase);
    }
    Ok(())
}
