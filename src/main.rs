//! Taskirra Frontend Entry Point

mod app;
mod browser;
mod commands;
mod components;
mod context;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use rolling_logger::{Level, LevelFilter, LogEntry, LoggerConfig};

/// Mirror info and above to the browser console; debug lines stay buffered
fn console_sink(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from_str(&entry.to_string());
    match entry.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::log_1(&line),
        _ => {}
    }
}

/// Print the buffered trail, debug lines included, before the panic message
fn print_log_trail() {
    let trail = rolling_logger::recent_entries();
    web_sys::console::group_collapsed_1(&format!("[MAIN] last {} log lines", trail.len()).into());
    for entry in &trail {
        web_sys::console::log_1(&entry.to_string().into());
    }
    web_sys::console::group_end();
}

fn main() {
    std::panic::set_hook(Box::new(|info| {
        print_log_trail();
        console_error_panic_hook::hook(info);
    }));

    let config = LoggerConfig::new("Taskirra")
        .with_level(LevelFilter::DEBUG)
        .with_sink(console_sink);
    if let Err(e) = rolling_logger::init_logger(config) {
        web_sys::console::error_1(&format!("[MAIN] logger: {}", e).into());
    }

    mount_to_body(App);
}
