//! Starts zipwm.
//!
//! With no arguments the user configuration is recompiled if it is stale and
//! the manager starts fresh. `--resume` adopts the window arrangement a
//! previous instance serialized before re-exec'ing.
use clap::Arg;
use tracing_subscriber::EnvFilter;
use x11rb_display_server::X11rbDisplayServer;
use zipwm_core::{ExitAction, Manager};

mod config;
mod recompile;

fn main() {
    setup_logging();

    let matches = clap::Command::new("zipwm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tiling window manager built around a workspace zipper")
        .arg(
            Arg::new("resume")
                .long("resume")
                .value_name("STATE")
                .help("Adopt a window arrangement serialized by a previous instance"),
        )
        .get_matches();
    let resume = matches.get_one::<String>("resume");

    let config = config::load();
    if resume.is_none() && !recompile::recompile(false) {
        tracing::warn!("starting with the existing binary, the rebuilt one failed");
    }

    let mut manager = match Manager::<config::Config, X11rbDisplayServer>::new(config) {
        Ok(manager) => manager,
        Err(err) => {
            tracing::error!("could not initialise: {err}");
            std::process::exit(1);
        }
    };
    if let Some(blob) = resume {
        manager.restore_state(blob);
    }

    tracing::info!("zipwm booted");
    match manager.event_loop() {
        ExitAction::Exit => tracing::info!("bye"),
        ExitAction::Restart { resume_state } => recompile::exec_restart(resume_state),
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
