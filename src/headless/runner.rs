//! Headless mode runner - stdin commands in, NDJSON events out
//!
//! Commands from stdin and messages from background tasks (timers, document
//! store writes) are multiplexed into the engine. After every step the
//! engine's broadcast events are written to stdout.

use tokio::sync::{broadcast, mpsc};

use cdraft_app::config::Settings;
use cdraft_app::{DocumentStore, Engine, EngineEvent, Message};
use cdraft_core::fixtures::blueprint_library;
use cdraft_core::logging;
use cdraft_core::prelude::*;

use super::HeadlessEvent;
use crate::commands::{parse_command, Command};

/// A line read from stdin
#[derive(Debug)]
enum Input {
    Command(Command),
    Invalid(String),
}

/// What woke the event loop
enum Next {
    Message(Option<Message>),
    Input(Option<Input>),
}

/// Run in headless mode until `quit`, or until stdin closes and the wizard is idle
pub async fn run_headless(settings: Settings) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Complaint Drafter starting in HEADLESS mode");
    info!("Export directory: {}", settings.export.directory.display());
    info!("═══════════════════════════════════════════════════════");

    let output_dir = settings.export.directory.clone();
    let mut engine = Engine::new(settings);
    let mut events = engine.subscribe();

    let (input_tx, input_rx) = mpsc::channel::<Input>(64);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(input_tx);
    });

    let log_file = logging::get_current_log_file().ok();
    HeadlessEvent::ready(&output_dir, log_file.as_deref()).emit();

    let result = headless_event_loop(&mut engine, input_rx, &mut events).await;

    engine.shutdown().await;
    flush_events(&mut events);

    info!("Complaint Drafter headless mode exiting");
    result
}

/// Main headless event loop
///
/// `wait` stops reading input until no timer or write is outstanding. Once
/// input is exhausted the loop keeps serving background messages and exits
/// as soon as the wizard is idle.
async fn headless_event_loop<S>(
    engine: &mut Engine<S>,
    mut input_rx: mpsc::Receiver<Input>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let mut waiting = false;
    let mut input_closed = false;

    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        let busy = engine.state.is_busy();
        if waiting && !busy {
            waiting = false;
        }
        if input_closed && !busy {
            info!("Input closed and no work outstanding");
            break;
        }

        let next = tokio::select! {
            msg = engine.msg_rx.recv() => Next::Message(msg),
            input = input_rx.recv(), if !waiting && !input_closed => Next::Input(input),
        };

        match next {
            Next::Message(Some(msg)) => engine.process_message(msg),
            Next::Message(None) => {
                error!("Message channel closed");
                return Err(Error::ChannelClosed);
            }
            Next::Input(Some(Input::Command(command))) => match command {
                Command::Blueprints => HeadlessEvent::blueprints(blueprint_library()).emit(),
                Command::Show => match engine.state.draft() {
                    Some(draft) => HeadlessEvent::document(draft.render_plain_text()).emit(),
                    None => HeadlessEvent::rejected("No draft has been generated yet").emit(),
                },
                Command::Wait => waiting = true,
                Command::Send(msg) => engine.process_message(msg),
            },
            Next::Input(Some(Input::Invalid(reason))) => HeadlessEvent::rejected(reason).emit(),
            Next::Input(None) => {
                debug!("Stdin closed");
                input_closed = true;
            }
        }

        flush_events(events);
    }

    Ok(())
}

/// Write every queued engine event to stdout
fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine_event(event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Read stdin line by line and forward parsed commands (blocking version)
fn spawn_stdin_reader_blocking(input_tx: mpsc::Sender<Input>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let input = match line {
            Ok(line) => match parse_command(&line) {
                Ok(Some(command)) => Input::Command(command),
                Ok(None) => continue,
                Err(e) => Input::Invalid(e.to_string()),
            },
            Err(e) => {
                error!("Stdin read error: {}", e);
                break;
            }
        };

        if input_tx.blocking_send(input).is_err() {
            // Runner has exited
            break;
        }
    }

    info!("Stdin reader exiting");
}
