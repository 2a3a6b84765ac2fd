use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

use super::{handle_event, process_state, render, AppState};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Setup the terminal for TUI mode.
pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Wait up to one poll interval for a terminal event.
pub fn poll_event() -> io::Result<Option<Event>> {
    if event::poll(POLL_INTERVAL)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Draw and dispatch events until the user quits.
///
/// Errors from drawing or from `next_event` are returned to the caller,
/// which still owns the terminal and must restore it.
pub fn run_app<B, F>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    mut next_event: F,
) -> io::Result<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Option<Event>>,
{
    loop {
        terminal.draw(|f| render(f, state))?;

        if state.should_quit {
            return Ok(());
        }

        if let Some(event) = next_event()? {
            handle_event(event, state);
            process_state(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    use crate::{AssetMap, Catalog, Storefront, Theme};

    fn app() -> AppState {
        let catalog = Catalog::builtin().unwrap();
        let assets = AssetMap::for_catalog(&catalog, "assets/images");
        AppState::new(Storefront::new(catalog, assets, Theme::Light))
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn run_app_stops_on_quit() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut state = app();
        let mut events = VecDeque::from([key('t'), key('q')]);

        run_app(&mut terminal, &mut state, || Ok(events.pop_front())).unwrap();

        assert!(state.should_quit);
        assert_eq!(state.store.theme(), Theme::Dark);
    }

    #[test]
    fn run_app_hands_event_errors_back_to_caller() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut state = app();
        let mut events = VecDeque::from([Ok(Some(key('t'))), Err(io::Error::other("read failed"))]);

        let err = run_app(&mut terminal, &mut state, || events.pop_front().unwrap_or(Ok(None)))
            .unwrap_err();

        assert_eq!(err.to_string(), "read failed");
        assert!(!state.should_quit);
        assert_eq!(state.store.theme(), Theme::Dark);
    }
}
