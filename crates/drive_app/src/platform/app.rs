use std::io::BufRead;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use drive_core::{update, AppState, Msg};
use drive_engine::UploadSettings;
use drive_logging::drive_info;

use super::confirm::ConfirmGate;
use super::effects::EffectRunner;
use super::logging::LogDestination;
use super::{config, input, logging, render};

/// One unit of work for the dispatch loop: a core message, or a
/// shell-level request that never touches the state machine.
pub(crate) enum ShellEvent {
    Core(Msg),
    ShowStatus,
    Quit,
}

pub fn run_app() {
    logging::initialize(LogDestination::File);

    let config_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = config::load_config(&config_dir);
    drive_info!(
        "starting shell endpoint={} folder={}",
        config.endpoint,
        config.folder_id
    );

    let settings = UploadSettings {
        endpoint: config.endpoint.clone(),
        max_bytes: config.max_upload_bytes,
        ..UploadSettings::default()
    };

    let (event_tx, event_rx) = mpsc::channel::<ShellEvent>();
    let confirm = Arc::new(ConfirmGate::new());
    let runner = EffectRunner::new(event_tx.clone(), settings, confirm.clone());
    spawn_stdin_reader(event_tx, confirm, config.folder_id.clone());

    println!("drive shell ready; type `help` for commands");

    let mut state = AppState::new();
    let mut turn: u64 = 0;
    while let Ok(event) = event_rx.recv() {
        match event {
            ShellEvent::Quit => break,
            ShellEvent::ShowStatus => render::render(&state.view()),
            ShellEvent::Core(msg) => {
                turn += 1;
                drive_logging::set_dispatch_turn(turn);
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                runner.run(effects);
                if state.consume_dirty() {
                    render::render(&state.view());
                }
            }
        }
    }

    drive_info!("shell exiting after {} turn(s)", turn);
}

fn spawn_stdin_reader(tx: mpsc::Sender<ShellEvent>, confirm: Arc<ConfirmGate>, folder_id: String) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for event in input::parse_line(&line, &folder_id, &confirm) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(ShellEvent::Quit);
    });
}
