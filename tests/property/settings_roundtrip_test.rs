//! Property-based tests for ShellSettings serialization round-trip.
//!
//! These tests verify that ShellSettings can be serialized to JSON and
//! deserialized back without data loss, and that the file written by the
//! settings engine reads back to the same value.

use blablador::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use blablador::types::settings::{
    CredentialSettings, GeneralSettings, LoggingSettings, Presentation, ShareSettings, ShareTarget,
    ShellSettings, VoiceSettings, WebViewSettings, WindowSettings,
};
use proptest::prelude::*;

// --- Arbitrary strategies for all settings sub-types ---

fn arb_presentation() -> impl Strategy<Value = Presentation> {
    prop_oneof![Just(Presentation::Desktop), Just(Presentation::Compact)]
}

fn arb_share_target() -> impl Strategy<Value = ShareTarget> {
    prop_oneof![Just(ShareTarget::Clipboard), Just(ShareTarget::Email)]
}

fn arb_general_settings() -> impl Strategy<Value = GeneralSettings> {
    (
        prop_oneof![Just("https"), Just("http")],
        "[a-z][a-z0-9.-]{2,30}",
        "[A-Za-z][A-Za-z0-9 ]{0,20}",
        arb_presentation(),
    )
        .prop_map(|(scheme, host, app_name, presentation)| GeneralSettings {
            start_url: format!("{}://{}", scheme, host),
            app_name,
            presentation,
        })
}

fn arb_window_settings() -> impl Strategy<Value = WindowSettings> {
    ("[A-Za-z ]{1,20}", 200u32..4000, 200u32..3000, 100u32..1000, 100u32..1000).prop_map(
        |(title, width, height, min_width, min_height)| WindowSettings {
            title,
            width: width as f64,
            height: height as f64,
            min_width: min_width as f64,
            min_height: min_height as f64,
        },
    )
}

fn arb_webview_settings() -> impl Strategy<Value = WebViewSettings> {
    (any::<bool>(), any::<bool>(), 1usize..1000).prop_map(
        |(javascript_can_open_windows, back_forward_gestures, max_history_entries)| {
            WebViewSettings {
                javascript_can_open_windows,
                back_forward_gestures,
                max_history_entries,
            }
        },
    )
}

fn arb_voice_settings() -> impl Strategy<Value = VoiceSettings> {
    (any::<bool>(), 1024u16..65535, 1u32..1000).prop_map(|(enabled, port, max_requests_per_second)| {
        VoiceSettings {
            enabled,
            listen_addr: format!("127.0.0.1:{}", port),
            max_requests_per_second,
        }
    })
}

fn arb_credential_settings() -> impl Strategy<Value = CredentialSettings> {
    (
        proptest::collection::vec("/[a-z]{1,10}(/[a-z]{1,10}){0,3}", 0..4),
        0u64..10_000,
    )
        .prop_map(|(extra_targets, return_delay_ms)| CredentialSettings {
            extra_targets,
            return_delay_ms,
        })
}

fn arb_shell_settings() -> impl Strategy<Value = ShellSettings> {
    (
        arb_general_settings(),
        arb_window_settings(),
        arb_webview_settings(),
        arb_voice_settings(),
        arb_share_target(),
        arb_credential_settings(),
        "[a-z]{3,10}=(trace|debug|info|warn|error)",
    )
        .prop_map(
            |(general, window, webview, voice, target, credentials, level)| ShellSettings {
                general,
                window,
                webview,
                voice,
                share: ShareSettings { target },
                credentials,
                logging: LoggingSettings { level },
            },
        )
}

// **Property 1: Settings serialization round-trip**
//
// *For any* valid `ShellSettings` struct, serializing to JSON then
// deserializing SHALL produce an equivalent struct.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn settings_serialization_roundtrip(settings in arb_shell_settings()) {
        let json = serde_json::to_string(&settings)
            .expect("Serialization to JSON should succeed for any valid ShellSettings");

        let deserialized: ShellSettings = serde_json::from_str(&json)
            .expect("Deserialization from JSON should succeed for valid JSON");

        prop_assert_eq!(
            deserialized,
            settings,
            "Deserialized ShellSettings must equal the original"
        );
    }
}

// **Property 2: Settings file round-trip**
//
// *For any* start URL written through `set_value`, a fresh engine reading
// the same file SHALL see it.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    #[test]
    fn settings_file_roundtrip(general in arb_general_settings()) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json").to_string_lossy().to_string();

        let mut engine = SettingsEngine::new(Some(path.clone()));
        engine.load().expect("load defaults");
        engine
            .set_value("general", serde_json::to_value(&general).expect("to_value"))
            .expect("set_value should accept a valid section");

        let mut reloaded = SettingsEngine::new(Some(path));
        let settings = reloaded.load().expect("reload");
        prop_assert_eq!(settings.general, general);
    }
}
