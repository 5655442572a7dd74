use std::io::{self, Stdout};
use std::path::Path;
use std::sync::mpsc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use thiserror::Error;

use deck_logging::deck_info;
use opsdeck_core::{update, AppState, Msg, Panel};

use crate::config;
use crate::effects::EffectRunner;
use crate::logging;
use crate::ui;
use crate::ui::constants::POLL_PERIOD;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),
}

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run_app() -> Result<(), AppError> {
    logging::initialize(logging::LogDestination::File);
    deck_info!("opsdeck starting");

    let app_config = config::load_or_default(Path::new(config::CONFIG_FILENAME));
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let effects = EffectRunner::new(app_config.sim_settings(), msg_tx);

    let mut state = AppState::new();
    dispatch(&mut state, &effects, app_config.fixtures_msg());

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut state, &effects, &msg_rx);
    restore_terminal(&mut terminal)?;
    deck_info!("opsdeck exiting");
    result
}

fn setup_terminal() -> Result<Term, AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<(), AppError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Term,
    state: &mut AppState,
    effects: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> Result<(), AppError> {
    // Text typed into the new-task box lives here while editing; the core
    // receives the full text on every change, like any controlled input.
    let mut editing = false;
    let mut input = String::new();
    let mut force_redraw = true;

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            dispatch(state, effects, msg);
        }

        if state.consume_dirty() || force_redraw {
            let view = state.view();
            terminal.draw(|frame| ui::render::render(frame, &view, editing))?;
            force_redraw = false;
        }

        if !event::poll(POLL_PERIOD)? {
            dispatch(state, effects, Msg::Tick);
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if editing {
                    match handle_editing_key(key, &mut input) {
                        EditOutcome::Changed(msg) => dispatch(state, effects, msg),
                        EditOutcome::Submitted => {
                            dispatch(state, effects, Msg::TaskSubmitted);
                            input.clear();
                            editing = false;
                            force_redraw = true;
                        }
                        EditOutcome::Cancelled => {
                            editing = false;
                            force_redraw = true;
                        }
                        EditOutcome::Ignored => {}
                    }
                } else {
                    match handle_key(key, state) {
                        KeyOutcome::Quit => return Ok(()),
                        KeyOutcome::StartEditing => {
                            input = state.view().task_input;
                            editing = true;
                            force_redraw = true;
                        }
                        KeyOutcome::Forward(msg) => dispatch(state, effects, msg),
                        KeyOutcome::Ignored => {}
                    }
                }
            }
            Event::Resize(_, _) => force_redraw = true,
            _ => {}
        }
    }
}

enum EditOutcome {
    Changed(Msg),
    Submitted,
    Cancelled,
    Ignored,
}

fn handle_editing_key(key: KeyEvent, input: &mut String) -> EditOutcome {
    match key.code {
        KeyCode::Enter => EditOutcome::Submitted,
        KeyCode::Esc => EditOutcome::Cancelled,
        KeyCode::Backspace => {
            input.pop();
            EditOutcome::Changed(Msg::InputChanged(input.clone()))
        }
        KeyCode::Char(c) => {
            input.push(c);
            EditOutcome::Changed(Msg::InputChanged(input.clone()))
        }
        _ => EditOutcome::Ignored,
    }
}

enum KeyOutcome {
    Quit,
    StartEditing,
    Forward(Msg),
    Ignored,
}

fn handle_key(key: KeyEvent, state: &AppState) -> KeyOutcome {
    match key.code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Char('1') => return KeyOutcome::Forward(Msg::PanelSelected(Panel::Commands)),
        KeyCode::Char('2') => return KeyOutcome::Forward(Msg::PanelSelected(Panel::Upload)),
        KeyCode::Char('3') => return KeyOutcome::Forward(Msg::PanelSelected(Panel::Bookmarks)),
        KeyCode::Tab => return KeyOutcome::Forward(Msg::PanelSelected(next_panel(state.panel()))),
        _ => {}
    }

    match state.panel() {
        Panel::Commands => match key.code {
            KeyCode::Char('r') => KeyOutcome::Forward(Msg::RunAllClicked),
            KeyCode::Char('R') => KeyOutcome::Forward(Msg::ResetClicked),
            KeyCode::Char('a') => KeyOutcome::StartEditing,
            KeyCode::Char('d') | KeyCode::Delete => match state.selected_task() {
                Some(task_id) => KeyOutcome::Forward(Msg::TaskRemoved { task_id }),
                None => KeyOutcome::Ignored,
            },
            KeyCode::Down | KeyCode::Char('j') => KeyOutcome::Forward(Msg::SelectNextTask),
            KeyCode::Up | KeyCode::Char('k') => KeyOutcome::Forward(Msg::SelectPrevTask),
            _ => KeyOutcome::Ignored,
        },
        Panel::Upload => match key.code {
            KeyCode::Char('f') => KeyOutcome::Forward(Msg::SelectFolderClicked),
            KeyCode::Char('u') => KeyOutcome::Forward(Msg::UploadClicked),
            _ => KeyOutcome::Ignored,
        },
        Panel::Bookmarks => match key.code {
            KeyCode::Char('s') => KeyOutcome::Forward(Msg::SyncClicked),
            _ => KeyOutcome::Ignored,
        },
    }
}

fn next_panel(panel: Panel) -> Panel {
    match panel {
        Panel::Commands => Panel::Upload,
        Panel::Upload => Panel::Bookmarks,
        Panel::Bookmarks => Panel::Commands,
    }
}

fn dispatch(state: &mut AppState, effects: &EffectRunner, msg: Msg) {
    let current = std::mem::take(state);
    let (next, pending) = update(current, msg);
    *state = next;
    effects.run(pending);
}
