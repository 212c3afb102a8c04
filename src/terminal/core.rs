use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use ratatui::{
    DefaultTerminal,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::Terminal;
use super::data::{UiEvent, View};
use super::draw::draw;
use super::message::Message;
use crate::log::Log;

const SCOPE: &str = "terminal";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Core implementation of the terminal actor.
///
/// Owns the ratatui terminal for drawing. Key input is read on a dedicated
/// thread, since crossterm's reads block, and forwarded as [`UiEvent`]s.
pub struct Core {
    log: Log,
    terminal: DefaultTerminal,
    ui_events: mpsc::Sender<UiEvent>,
    stop: Arc<AtomicBool>,
}

impl Core {
    /// Takes over the terminal (alternate screen, raw mode).
    pub fn build(log: Log, ui_events: mpsc::Sender<UiEvent>) -> anyhow::Result<Self> {
        let terminal = ratatui::try_init().context("Taking over the terminal")?;
        Ok(Self {
            log,
            terminal,
            ui_events,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Spawns the terminal actor and its input thread.
    pub fn spawn(mut self) -> (Terminal, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Message>(crate::BUFFER_SIZE);

        let ui_events = self.ui_events.clone();
        let stop = self.stop.clone();
        let log = self.log.clone();
        let runtime = tokio::runtime::Handle::current();
        thread::spawn(move || {
            // Logging spawns tasks
            let _guard = runtime.enter();
            read_input(ui_events, stop, log)
        });

        let handle = tokio::spawn(async move {
            self.log.info(SCOPE, "Terminal actor spawned");

            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Show { view, tx } => {
                        let res = self.show(&view);
                        let _ = tx.send(res);
                    }
                    Message::Quit { tx } => {
                        self.stop.store(true, Ordering::Relaxed);
                        let res = ratatui::try_restore().context("Restoring the terminal");
                        let _ = tx.send(res);
                        break;
                    }
                }
            }
        });

        (Terminal::Actual(tx), handle)
    }

    fn show(&mut self, view: &View) -> anyhow::Result<()> {
        self.terminal
            .draw(|frame| draw(frame, view))
            .context("Drawing frame")?;
        Ok(())
    }
}

/// Maps a key press to a [`UiEvent`]. Releases and unknown keys give `None`.
pub fn map_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let event = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => UiEvent::Interrupt,
        KeyCode::Up => UiEvent::Up,
        KeyCode::Down => UiEvent::Down,
        KeyCode::Left => UiEvent::Left,
        KeyCode::Right => UiEvent::Right,
        KeyCode::Enter => UiEvent::Enter,
        KeyCode::Esc => UiEvent::Esc,
        KeyCode::Tab => UiEvent::NextScreen,
        KeyCode::BackTab => UiEvent::PrevScreen,
        KeyCode::Backspace => UiEvent::Backspace,
        KeyCode::Char(c) => UiEvent::Char(c),
        _ => return None,
    };
    Some(event)
}

fn read_input(ui_events: mpsc::Sender<UiEvent>, stop: Arc<AtomicBool>, log: Log) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                log.error(SCOPE, format!("Polling input failed: {}", err));
                break;
            }
        }
        let event = match event::read() {
            Ok(Event::Key(key)) => map_key(key),
            Ok(Event::Resize(_, _)) => Some(UiEvent::Resize),
            Ok(_) => None,
            Err(err) => {
                log.error(SCOPE, format!("Reading input failed: {}", err));
                break;
            }
        };
        if let Some(event) = event {
            if ui_events.blocking_send(event).is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(map_key(press(KeyCode::Tab)), Some(UiEvent::NextScreen));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(UiEvent::Char('q')));
        assert_eq!(map_key(press(KeyCode::F(1))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UiEvent::Interrupt)
        );

        let mut release = press(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
