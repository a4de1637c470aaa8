//! Keyboard listener. Runs on its own thread and feeds translated key
//! events into the channel drained by the game loop.

use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use log::info;

use crate::error::SnakeError;
use crate::shutdown::ShutdownSignal;
use crate::snake::Direction;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Turn(Direction),
    Quit,
}

/// Thread body of the listener. Exits once the shutdown signal is
/// observed or a quit key arrives, and signals shutdown itself on every
/// exit path so the game loop never outlives it unknowingly. A read
/// failure is fatal.
pub fn listen(events: Sender<InputEvent>, shutdown: ShutdownSignal) -> Result<(), SnakeError> {
    let outcome = listen_loop(&events, &shutdown);
    shutdown.signal();
    outcome
}

fn listen_loop(events: &Sender<InputEvent>, shutdown: &ShutdownSignal) -> Result<(), SnakeError> {
    loop {
        if shutdown.is_signalled() {
            return Ok(());
        }

        if !poll(POLL_INTERVAL)? {
            continue;
        }

        let key_ev = match read()? {
            Event::Key(ev) => ev,
            _ => continue,
        };

        match translate(&key_ev) {
            Some(InputEvent::Quit) => {
                info!("quit key pressed");
                // The game loop learns about it both ways, whichever it
                // looks at first.
                let _ = events.send(InputEvent::Quit);
                return Ok(());
            }
            Some(event) => {
                if events.send(event).is_err() {
                    // Receiver gone, the game loop already exited.
                    return Ok(());
                }
            }
            None => {}
        }
    }
}

/// Maps a key to a game event. Movement is on the arrow keys with WASD
/// as an alias, Esc and Ctrl+C quit.
pub fn translate(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
        KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn arrows_and_wasd_turn_the_snake() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Char('d'), Direction::Right),
        ];

        for (code, direction) in cases {
            assert_eq!(translate(&key(code)), Some(InputEvent::Turn(direction)));
        }
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        assert_eq!(translate(&key(KeyCode::Esc)), Some(InputEvent::Quit));

        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(translate(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(translate(&key(KeyCode::Enter)), None);
        assert_eq!(translate(&key(KeyCode::Char('x'))), None);
        // A plain c is not a quit request.
        assert_eq!(translate(&key(KeyCode::Char('c'))), None);
    }
}
