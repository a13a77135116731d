mod cli;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::unbounded;

use padpointer_control::Performer;
use padpointer_gamepad::ControllerManager;
use padpointer_workspace::{Settings, SettingsEvent, Workspace};
use padpointerd::api::{ApiTransport, Command as ApiCommand, UnixSocket};
use padpointerd::app::PointerSink;
use padpointerd::host::{ScreenSink, TraceSink};
use padpointerd::runner::{CancelToken, FrameLoop, LoopInputs};
use padpointerd::{logging, print_debug, print_error, print_info, print_warning};

use crate::cli::{Cli, Command};

/// Rumble strength for mode change feedback.
const FEEDBACK_STRENGTH: f32 = 0.2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::setup(cli.verbose, cli.no_color) {
        eprintln!("failed to set up logger: {e}");
        return ExitCode::FAILURE;
    }

    let workspace = match Workspace::new(cli.workspace.as_deref()) {
        Ok(workspace) => workspace,
        Err(e) => {
            print_error!("failed to open workspace: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Run { dry_run } => run(&workspace, dry_run),
        Command::Activate => send(&workspace, ApiCommand::Activate),
        Command::Deactivate => send(&workspace, ApiCommand::Deactivate),
    }
}

fn send(workspace: &Workspace, command: ApiCommand) -> ExitCode {
    match UnixSocket::new(workspace.path()).send_event(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error!("failed to send {command:?}: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(workspace: &Workspace, dry_run: bool) -> ExitCode {
    let settings = match workspace.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            print_error!("failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let manager = match ControllerManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            print_error!("failed to start controller manager: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        print_error!("failed to set Ctrl+C handler: {e}");
        return ExitCode::FAILURE;
    }

    let (api_tx, api_rx) = unbounded::<ApiCommand>();
    let socket = UnixSocket::new(workspace.path());
    if let Err(e) = socket.listen_events(api_tx) {
        print_warning!("control socket disabled: {e}");
    }

    // The watcher reports over std::mpsc, bridge it to crossbeam.
    let (settings_tx, settings_rx) = unbounded::<SettingsEvent>();
    let _watcher = match workspace.start_settings_watcher() {
        Ok((watcher, std_rx)) => {
            std::thread::spawn(move || {
                while let Ok(event) = std_rx.recv() {
                    if settings_tx.send(event).is_err() {
                        break;
                    }
                }
            });
            Some(watcher)
        }
        Err(e) => {
            print_warning!("settings hot reload disabled: {e}");
            None
        }
    };

    let inputs = LoopInputs {
        controller: manager.subscribe(),
        api: api_rx,
        settings: settings_rx,
    };

    let code = if dry_run {
        drive(&manager, TraceSink::new(&settings), settings, &cancel, inputs)
    } else {
        let performer = match Performer::new() {
            Ok(performer) => performer,
            Err(e) => {
                print_error!("failed to start input performer: {e}");
                return ExitCode::FAILURE;
            }
        };
        match ScreenSink::new(performer, &settings) {
            Ok(sink) => drive(&manager, sink, settings, &cancel, inputs),
            Err(e) => {
                print_error!("failed to prepare screen sink: {e}");
                ExitCode::FAILURE
            }
        }
    };

    let _ = fs::remove_file(socket.path());
    code
}

fn drive<S: PointerSink>(
    manager: &ControllerManager,
    sink: S,
    settings: Settings,
    cancel: &CancelToken,
    inputs: LoopInputs,
) -> ExitCode {
    let mut frame_loop = FrameLoop::new(manager, sink, settings);
    let viewport = frame_loop.session().state().bounds;
    print_info!(
        "padpointerd started ({}x{}). Press Start to take over the pointer, X to release it.",
        viewport.width,
        viewport.height
    );

    frame_loop.run(cancel, inputs, |id, duration| {
        if !manager.supports_rumble(id) {
            return;
        }
        if let Some(handle) = manager.controller(id) {
            if let Err(e) = handle.rumble(FEEDBACK_STRENGTH, duration) {
                print_debug!("rumble failed: {e}");
            }
        }
    });

    print_info!("padpointerd stopped");
    ExitCode::SUCCESS
}
