use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use compressor_core::{update, AppState, Msg};
use compressor_logging::{compressor_info, compressor_warn};

use super::cli::Cli;
use super::effects::EffectRunner;
use super::logging;
use super::settings::Settings;
use super::ui::commands::{self, Command};
use super::ui::render;

/// Everything the event loop reacts to, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user.
    Line(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message produced by the engine.
    Msg(Msg),
}

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let settings = Settings::resolve(&cli)?;
    compressor_info!(
        "Starting with api_base={} download_dir={:?}",
        settings.api_base,
        settings.download_dir
    );

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let effects = EffectRunner::new(&settings, tx.clone())
        .context("starting the compression engine")?;
    spawn_stdin_reader(tx);

    println!("Compressor: reduce the size of PDFs and images (JPG/PNG).");
    println!("Downloads go to {}", settings.download_dir.display());
    println!("{}", commands::HELP);

    let mut app = App::new(AppState::with_quality(settings.initial_quality()), effects);
    app.show();
    app.dispatch(Msg::HealthCheckRequested);
    app.run(rx);
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || forward_lines(io::stdin().lock(), &tx));
}

/// Sends each input line as an event, then `InputClosed` at end of input.
/// Bytes that are not UTF-8 are replaced rather than ending the session.
fn forward_lines<R: BufRead>(mut reader: R, tx: &mpsc::Sender<AppEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                compressor_warn!("stdin read failed: {}", err);
                break;
            }
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        if tx.send(AppEvent::Line(line)).is_err() {
            return;
        }
    }
    let _ = tx.send(AppEvent::InputClosed);
}

struct App {
    state: AppState,
    effects: EffectRunner,
    closing: bool,
}

impl App {
    fn new(state: AppState, effects: EffectRunner) -> Self {
        Self {
            state,
            effects,
            closing: false,
        }
    }

    fn run(&mut self, rx: mpsc::Receiver<AppEvent>) {
        while let Ok(event) = rx.recv() {
            match event {
                AppEvent::Line(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                AppEvent::InputClosed => self.closing = true,
                AppEvent::Msg(msg) => self.dispatch(msg),
            }
            // Scripted input: leave once stdin is done and nothing is in flight.
            if self.closing && !self.state.busy() {
                break;
            }
        }
        compressor_info!("Event loop finished");
    }

    /// Returns false when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        match commands::parse(line) {
            Ok(Command::Pick { kind, path }) => {
                let file = match path {
                    Some(path) => match commands::resolve_pick(kind, &path) {
                        Ok(file) => Some(file),
                        Err(err) => {
                            println!("{err}");
                            return true;
                        }
                    },
                    None => None,
                };
                self.dispatch(Msg::FileSelected { kind, file });
            }
            Ok(Command::Quality(quality)) => self.dispatch(Msg::QualityChanged(quality)),
            Ok(Command::Compress(kind)) => self.dispatch(Msg::CompressClicked(kind)),
            Ok(Command::Health) => self.dispatch(Msg::HealthCheckRequested),
            Ok(Command::Show) => self.show(),
            Ok(Command::Help) => println!("{}", commands::HELP),
            Ok(Command::Quit) => {
                if self.state.busy() {
                    compressor_warn!("Quitting with a request in flight");
                }
                return false;
            }
            Ok(Command::Nothing) => self.dispatch(Msg::NoOp),
            Err(err) => println!("{err}"),
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.show();
        }
        self.effects.run(effects);
    }

    fn show(&self) {
        let stamp = Local::now().format("%H:%M:%S");
        println!("--- {stamp}");
        for line in render::render(&self.state.view()) {
            println!("{line}");
        }
    }
}
