use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use chrono::Utc;
use uploader_core::{update, AppState, Msg};
use uploader_engine::{EngineHandle, ReqwestBucketApi};
use uploader_logging::{client_info, client_warn, LevelFilter, DEFAULT_LOG_PATH};

use super::config::{self, Args};
use super::effects::EffectRunner;
use super::ui::input::{parse_command, selection_for, Command, HELP};
use super::ui::render::render;

/// Everything the main loop reacts to, from stdin or from the engine.
pub enum Input {
    Msg(Msg),
    Print(Vec<String>),
    Quit,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    // Before config loading, so its log lines are kept.
    uploader_logging::initialize(args.log.into(), LevelFilter::Info, Path::new(DEFAULT_LOG_PATH));
    let file_config = config::load_file_config(&args.config)?;
    let config = config::resolve(&args, file_config)?;
    client_info!("Using endpoint {}", config.client.endpoint);

    let api = ReqwestBucketApi::new(config.client)?;
    let clock = Arc::new(|| Utc::now().to_rfc3339());
    let (engine, events) = EngineHandle::spawn(Arc::new(api), clock)?;

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    let runner = EffectRunner::new(engine, events, input_tx.clone());
    spawn_stdin_reader(input_tx.clone());

    let mut out = io::stdout();
    let mut state = AppState::new();
    print_lines(&mut out, HELP.iter().map(|line| line.to_string()))?;
    let _ = input_tx.send(Input::Msg(Msg::Mounted));
    drop(input_tx);

    while let Ok(input) = input_rx.recv() {
        match input {
            Input::Msg(msg) => {
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    print_lines(&mut out, render(&state.view()))?;
                }
            }
            Input::Print(lines) => print_lines(&mut out, lines)?,
            Input::Quit => break,
        }
    }

    client_info!("Exiting");
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    client_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            let input = match parse_command(&line) {
                Command::Select(path) => match selection_for(&path) {
                    Some(file) => Input::Msg(Msg::FileSelected(Some(file))),
                    None => Input::Print(vec![format!("Not a file: {}", path.display())]),
                },
                Command::Upload => Input::Msg(Msg::UploadClicked),
                Command::Help => Input::Print(HELP.iter().map(|line| line.to_string()).collect()),
                Command::Quit => Input::Quit,
                Command::Empty => Input::Msg(Msg::NoOp),
                Command::Unknown(text) => {
                    Input::Print(vec![format!("Unknown command: {text} (try `help`)")])
                }
            };
            let quit = matches!(input, Input::Quit);
            if input_tx.send(input).is_err() || quit {
                return;
            }
        }
        let _ = input_tx.send(Input::Quit);
    });
}

fn print_lines(out: &mut impl Write, lines: impl IntoIterator<Item = String>) -> io::Result<()> {
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
