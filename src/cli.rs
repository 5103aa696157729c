use clap::Parser;

/// Blablador: a native shell around the Blablador web front-end.
#[derive(Parser, Debug)]
#[command(name = "blablador", version, about)]
pub struct Args {
    /// Page to open instead of the configured start URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (tracing filter directive, e.g. `blablador=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Sends a command to a running Blablador shell.
#[derive(Parser, Debug)]
#[command(name = "blablador-tell", version, about)]
pub struct TellArgs {
    /// What Blablador should do. Without `--utterance` this is the command itself.
    pub words: Vec<String>,

    /// Treat the words as a full spoken phrase ("Tell Blablador to ...").
    #[arg(short, long)]
    pub utterance: bool,

    /// Print the intent definition and exit.
    #[arg(long)]
    pub describe: bool,

    /// Address of the shell's intent socket.
    #[arg(long, default_value = crate::types::settings::DEFAULT_INTENT_ADDR)]
    pub addr: String,

    /// Seconds to wait for the shell to answer.
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,

    /// Log level override.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_tell() -> TellArgs {
    TellArgs::parse()
}
