//! blablador-tell: hands a voice command to a running Blablador shell.
//!
//! Meant to be wired to a voice assistant or a desktop shortcut:
//!   blablador-tell summarize this page
//!   blablador-tell --utterance "Tell Blablador to summarize this page"

use std::process::ExitCode;
use std::time::Duration;

use serde_json::json;

use blablador::cli;
use blablador::intent_server::send_request;
use blablador::logging;
use blablador::types::intent::IntentRequest;

fn main() -> ExitCode {
    let args = cli::parse_tell();
    logging::init(args.log_level.as_deref());

    let text = args.words.join(" ");
    let (method, params) = if args.describe {
        ("intent.describe", json!({}))
    } else if args.utterance {
        ("intent.utter", json!({"utterance": text}))
    } else {
        ("intent.perform", json!({"command": text}))
    };

    let request = IntentRequest {
        id: json!(1),
        method: method.to_string(),
        params,
    };

    match send_request(&args.addr, &request, Duration::from_secs(args.timeout)) {
        Ok(response) => {
            if let Some(error) = response.error {
                eprintln!("{}", error);
                return ExitCode::FAILURE;
            }
            let result = response.result.unwrap_or_default();
            match result.get("dialog").and_then(|d| d.as_str()) {
                Some(dialog) => println!("{}", dialog),
                None => println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default()),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Is Blablador running? {e}");
            ExitCode::FAILURE
        }
    }
}
