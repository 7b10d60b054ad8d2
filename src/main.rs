#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use anyhow::Context;
use iced::Theme;
use reduce_ping::cli::{self, Invocation};
use tracing::error;

fn main() -> anyhow::Result<()> {
    reduce_ping::logging::init_logging().context("Failed to initialize logging")?;

    let invocation = Invocation::from_os_args(std::env::args_os().skip(1));
    if invocation != Invocation::Interactive {
        let code = match reduce_ping::system_toggle() {
            Ok(toggle) => cli::run_verb(&toggle, invocation),
            Err(e) => {
                error!(error = %e, "Cannot run {:?}", invocation);
                1
            }
        };
        std::process::exit(code);
    }

    iced::application("ReducePing", app::update, app::view)
        .theme(|_| Theme::Dark)
        .window(iced::window::Settings {
            size: iced::Size::new(420.0, 460.0),
            resizable: false,
            ..Default::default()
        })
        .run_with(app::init)
        .map_err(|e| anyhow::anyhow!("Window failed: {e}"))
}
