mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use solarframe_gui_lib::{ai, animation, i18n, parts, state, textures};

use app::SolarApp;
use solarframe_gui_lib::command;
use solarframe_gui_lib::harness::TestHarness;

fn main() {
    // Missing .env is fine, the key may come from the real environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solarframe=info,solarframe_gui_lib=info".into()),
        )
        .init();

    // --script <path>: run JSON commands headless and exit
    if let Some(path) = parse_script_arg() {
        run_script(&path);
        return;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("solarframe-ai")
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SolarFrame Pro")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "solarframe",
        native_options,
        Box::new(move |cc| Ok(Box::new(SolarApp::new(cc, runtime)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_script_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--script")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// One command or batch per non-empty line; one JSON response per command on stdout
fn run_script(path: &str) {
    let script = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to read script {path}: {e}");
            return;
        }
    };
    let mut harness = TestHarness::new();
    for line in script.lines().filter(|l| !l.trim().is_empty()) {
        for response in command::execute_line(&mut harness, line) {
            match serde_json::to_string(&response) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!("Failed to serialize response: {e}"),
            }
        }
    }
}
