use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    Action, Dispatched, Endpoints, FormField, FormState, HttpTransport, Orchestrator, UiUpdate,
};
use crossbeam_channel::{unbounded, Receiver};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod shell;

use config::load_settings;
use render::render_form;

#[derive(Parser, Debug)]
#[command(name = "sw_console", about = "Terminal client for the string state service")]
struct Cli {
    /// Service base URL; overrides client.toml and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// Path to a client.toml settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    GetState,
    SetState {
        state: String,
    },
    GetSplitter,
    /// Use [SPACE] to submit a space.
    SetSplitter {
        splitter: String,
    },
    TwoProp,
    Crash,
    /// Interactive form.
    Shell,
}

impl Command {
    /// Seeds the form inputs for one-shot commands. `None` means interactive mode.
    fn into_action(self, form: &mut FormState) -> Option<Action> {
        let action = match self {
            Self::GetState => Action::GetState,
            Self::SetState { state } => {
                form.set_text(FormField::State, state);
                Action::SubmitState
            }
            Self::GetSplitter => Action::GetSplitter,
            Self::SetSplitter { splitter } => {
                form.set_text(FormField::Splitter, splitter);
                Action::SubmitSplitter
            }
            Self::TwoProp => Action::GetTwoProp,
            Self::Crash => Action::Crash,
            Self::Shell => return None,
        };
        Some(action)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref(), cli.base_url.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?;
    let endpoints = Endpoints::new(&settings.base_url)?;
    tracing::info!(base_url = endpoints.base_url(), "client configured");

    let (ui_tx, ui_rx) = unbounded();
    let orchestrator = Orchestrator::new(
        Arc::new(HttpTransport::new()),
        endpoints,
        ui_tx,
        runtime.handle().clone(),
    );

    let mut form = FormState::new();
    match cli.command.into_action(&mut form) {
        Some(action) => run_once(&runtime, &orchestrator, &mut form, &ui_rx, action),
        None => shell::run(&orchestrator, &mut form, &ui_rx),
    }
}

fn run_once(
    runtime: &Runtime,
    orchestrator: &Orchestrator,
    form: &mut FormState,
    ui_rx: &Receiver<UiUpdate>,
    action: Action,
) -> Result<()> {
    let handle = match orchestrator.trigger(action, form) {
        Dispatched::Rejected(err) => bail!("{} not sent: {err}", action.name()),
        Dispatched::InFlight(handle) => handle,
    };
    runtime
        .block_on(handle)
        .with_context(|| format!("{} task failed", action.name()))?;

    form.drain(ui_rx);
    print!("{}", render_form(form));

    let notifications = form.take_notifications();
    if !notifications.is_empty() {
        return Err(anyhow!(notifications.join("; ")));
    }
    Ok(())
}
