//! Startup banner for the API server

use super::config::is_all_interfaces;
use super::constants::APP_NAME;

/// Clickable OSC 8 hyperlink where the terminal supports it
fn terminal_link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!("\x1b]8;;{}\x07\x1b[36m{}\x1b[0m\x1b]8;;\x07", url, url)
    } else {
        format!("\x1b[36m{}\x1b[0m", url)
    }
}

fn api_url(host: &str, port: u16) -> String {
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };
    format!("http://{}:{}/api/v1", display_host, port)
}

pub fn print_banner(host: &str, port: u16, table_url: &str, model: &str) {
    const W: usize = 8;
    let api = api_url(host, port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "API:",
        terminal_link(&format!("{}/books/search", api))
    );
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<W$}\x1b[0m {}",
        "Health:",
        terminal_link(&format!("{}/health", api))
    );
    println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", "Table:", table_url);
    println!("  \x1b[90m➜  {:<W$} {}\x1b[0m", "Model:", model);
    if host == "127.0.0.1" || host == "localhost" {
        println!(
            "  \x1b[90m➜  {:<W$} use --host 0.0.0.0 to expose\x1b[0m",
            "Network:"
        );
    }
    println!();
}
