//! Terminal backends. The game draws through the `Display` capability,
//! so the plain scrolling console and the full screen alternate buffer
//! are interchangeable.

use std::io::{stdout, Stdout, Write};

use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::config::{self, GameConfig};
use crate::error::SnakeError;
use crate::grid::Bounds;

/// What a cell holds, so each backend can decide how to paint it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Empty,
    Wall,
    Apple,
    Snake,
    Text,
}

pub trait Display {
    /// Drawable surface size in cells.
    fn size(&self) -> (u16, u16);

    fn clear(&mut self) -> crossterm::Result<()>;

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: CellStyle) -> crossterm::Result<()>;

    /// Pushes everything drawn since the last call out to the terminal.
    fn present(&mut self) -> crossterm::Result<()>;

    /// Feedback on apple consumption. Backends without sound keep the
    /// default no-op.
    fn beep(&mut self) -> crossterm::Result<()> {
        Ok(())
    }
}

/// Builds the backend picked by the configuration, along with the bounds
/// of the map it can fit.
pub fn setup(conf: &GameConfig) -> Result<(Box<dyn Display>, Bounds), SnakeError> {
    if conf.screen {
        let display = TermDisplay::new()?;
        let bounds = screen_bounds(display.size(), conf.size)?;
        Ok((Box::new(display), bounds))
    } else {
        let bounds = Bounds::square(i32::from(conf.map_size()));
        let display = ConsoleDisplay::new(bounds)?;
        Ok((Box::new(display), bounds))
    }
}

fn screen_bounds(term_size: (u16, u16), requested: Option<u16>) -> Result<Bounds, SnakeError> {
    let (term_w, term_h) = (i32::from(term_size.0), i32::from(term_size.1));

    // The top terminal row is reserved for the score line.
    let bounds = match requested {
        Some(size) => Bounds::square(i32::from(size)),
        None => Bounds::new(term_w, term_h - 1),
    };

    let min = i32::from(config::MIN_MAP_SIZE);
    if bounds.width() < min || bounds.height() < min {
        return Err(SnakeError::InvalidConfig(format!(
            "terminal is too small, the map needs at least {}x{} cells",
            min, min
        )));
    }
    if bounds.width() > term_w || bounds.height() > term_h - 1 {
        return Err(SnakeError::InvalidConfig(format!(
            "terminal is too small for a {}x{} map",
            bounds.width(),
            bounds.height()
        )));
    }

    Ok(bounds)
}

/// Full screen backend: alternate screen, raw mode, hidden cursor and
/// styled cells. The terminal is restored when the value is dropped.
pub struct TermDisplay {
    stdout: Stdout,
    width: u16,
    height: u16,
}

impl TermDisplay {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut display = TermDisplay {
            stdout: stdout(),
            width,
            height,
        };

        // The struct exists before the terminal is touched, so a partial
        // setup still gets unwound by Drop.
        execute!(display.stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(display)
    }
}

impl Display for TermDisplay {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, style: CellStyle) -> crossterm::Result<()> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }

        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            style::SetForegroundColor(color(style)),
            style::Print(glyph)
        )
    }

    fn present(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn beep(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, style::Print('\x07'))
    }
}

impl Drop for TermDisplay {
    fn drop(&mut self) {
        // Teardown errors have nowhere to go.
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
    }
}

fn color(style: CellStyle) -> style::Color {
    match style {
        CellStyle::Empty => style::Color::Reset,
        CellStyle::Wall => style::Color::Grey,
        CellStyle::Apple => style::Color::Red,
        CellStyle::Snake => style::Color::Green,
        CellStyle::Text => style::Color::White,
    }
}

/// Plain console backend: raw mode only, one full frame reprinted from a
/// char buffer per present. Styles are ignored.
pub struct ConsoleDisplay {
    stdout: Stdout,
    width: u16,
    height: u16,
    screen: Vec<char>,
}

impl ConsoleDisplay {
    pub fn new(bounds: Bounds) -> crossterm::Result<Self> {
        let width = bounds.width() as u16;
        // One extra row on top for the score line.
        let height = bounds.height() as u16 + 1;
        let screen = vec![' '; width as usize * height as usize];

        let display = ConsoleDisplay {
            stdout: stdout(),
            width,
            height,
            screen,
        };
        terminal::enable_raw_mode()?;
        Ok(display)
    }
}

impl Display for ConsoleDisplay {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> crossterm::Result<()> {
        for cell in self.screen.iter_mut() {
            *cell = ' ';
        }
        Ok(())
    }

    fn set_cell(&mut self, x: u16, y: u16, glyph: char, _style: CellStyle) -> crossterm::Result<()> {
        if x < self.width && y < self.height {
            self.screen[self.width as usize * y as usize + x as usize] = glyph;
        }
        Ok(())
    }

    fn present(&mut self) -> crossterm::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All)
        )?;

        for row in self.screen.chunks(self.width as usize) {
            let line: String = row.iter().collect();
            queue!(self.stdout, style::Print(line), style::Print("\r\n"))?;
        }

        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for ConsoleDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_screen_bounds_leave_the_score_row_out() {
        let bounds = screen_bounds((80, 24), None).unwrap();
        assert_eq!((bounds.width(), bounds.height()), (80, 23));
    }

    #[test]
    fn requested_size_wins_when_it_fits() {
        let bounds = screen_bounds((80, 24), Some(20)).unwrap();
        assert_eq!((bounds.width(), bounds.height()), (20, 20));
    }

    #[test]
    fn oversized_requests_are_rejected() {
        assert!(screen_bounds((25, 24), Some(30)).is_err());
        assert!(screen_bounds((80, 24), Some(24)).is_err());
    }

    #[test]
    fn tiny_terminals_are_rejected() {
        assert!(screen_bounds((12, 9), None).is_err());
        assert!(screen_bounds((9, 30), None).is_err());
    }
}
