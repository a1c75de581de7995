use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use lifeadmin_core::{disposition, update, AppState, AppViewModel, DragEvent, Msg};
use lifeadmin_engine::EngineHandle;
use lifeadmin_logging::{client_debug, client_info, client_warn, set_submission};

use super::commands::{parse_command, read_selection, ShellCommand, HELP};
use super::config::{load_config, ClientConfig};
use super::effects::EffectRunner;
use super::{logging, ui};

/// Everything the dispatch loop reacts to.
pub enum Inbound {
    Msg(Msg),
    Quit,
}

pub fn run_app(endpoint_override: Option<String>) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (mut config, config_error) = match load_config(&cwd) {
        Ok(config) => (config, None),
        Err(err) => (ClientConfig::default(), Some(err)),
    };
    logging::initialize(config.log_destination);
    if let Some(err) = config_error {
        client_warn!("using default configuration: {:#}", err);
    }
    if let Some(endpoint) = endpoint_override {
        config.endpoint = endpoint;
    }
    client_info!("lifeadmin client starting endpoint={}", config.endpoint);

    let engine = EngineHandle::new(config.upload_settings()).context("failed to start engine")?;
    let (inbound_tx, inbound_rx) = mpsc::channel::<Inbound>();
    let runner = EffectRunner::new(engine, inbound_tx.clone());

    spawn_clock(inbound_tx.clone());
    spawn_stdin_reader(inbound_tx);

    println!("LifeAdmin document client ({})", config.endpoint);
    println!("{HELP}");

    let mut state = AppState::with_toast_dwell(config.toast_dwell());
    present(&state.view());

    while let Ok(inbound) = inbound_rx.recv() {
        let msg = match inbound {
            Inbound::Msg(msg) => msg,
            Inbound::Quit => break,
        };
        let (next, effects) = update(state, msg);
        state = next;
        set_submission(state.in_flight_submission());
        runner.run(effects);
        if state.consume_dirty() {
            present(&state.view());
        }
    }

    client_info!("lifeadmin client exiting");
    Ok(())
}

fn present(view: &AppViewModel) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "\n{}", ui::render::render(view));
    let _ = write!(stdout, "> ");
    let _ = stdout.flush();
}

/// Wall-clock ticks used to timestamp toasts.
fn spawn_clock(inbound_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let interval = Duration::from_millis(250);
        loop {
            let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
            if inbound_tx.send(Inbound::Msg(Msg::Tick { now_ms })).is_err() {
                break;
            }
            thread::sleep(interval);
        }
    });
}

fn spawn_stdin_reader(inbound_tx: mpsc::Sender<Inbound>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let inbound = match parse_command(&line) {
                Ok(Some(command)) => to_inbound(command),
                Ok(None) => None,
                Err(message) => {
                    println!("{message}");
                    None
                }
            };
            if let Some(inbound) = inbound {
                let quitting = matches!(inbound, Inbound::Quit);
                if inbound_tx.send(inbound).is_err() || quitting {
                    return;
                }
            }
        }
        // EOF behaves like `quit`.
        let _ = inbound_tx.send(Inbound::Quit);
    });
}

fn to_inbound(command: ShellCommand) -> Option<Inbound> {
    let msg = match command {
        ShellCommand::Pick(paths) => Msg::FilesPicked(read_files(&paths)?),
        ShellCommand::DragOver => {
            client_debug!("drag-over: {:?}", disposition(DragEvent::Over));
            Msg::DragOver
        }
        ShellCommand::DragLeave => {
            client_debug!("drag-leave: {:?}", disposition(DragEvent::Leave));
            Msg::DragLeave
        }
        ShellCommand::Drop(paths) => {
            client_debug!("drop: {:?}", disposition(DragEvent::Drop));
            Msg::FilesDropped(read_files(&paths)?)
        }
        ShellCommand::Submit => Msg::SubmitClicked,
        ShellCommand::Status => Msg::StatusRequested,
        ShellCommand::Help => {
            println!("{HELP}");
            return None;
        }
        ShellCommand::Quit => return Some(Inbound::Quit),
    };
    Some(Inbound::Msg(msg))
}

fn read_files(paths: &[std::path::PathBuf]) -> Option<Vec<lifeadmin_core::SelectedFile>> {
    match read_selection(paths) {
        Ok(files) => Some(files),
        Err(err) => {
            println!("{err:#}");
            None
        }
    }
}
