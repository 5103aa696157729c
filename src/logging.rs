use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "blablador=info";

/// Installs the global fmt subscriber. `RUST_LOG` is honoured; `directive`
/// is added on top of it.
pub fn init(directive: Option<&str>) {
    let directive = directive.unwrap_or(FALLBACK_DIRECTIVE);
    let parsed: Result<Directive, _> = directive
        .parse()
        .or_else(|_| FALLBACK_DIRECTIVE.parse());

    let mut filter = EnvFilter::from_default_env();
    if let Ok(d) = parsed {
        filter = filter.add_directive(d);
    }

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
