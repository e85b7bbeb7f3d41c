use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, size, Clear, ClearType},
};
use std::io::{self, stdout, Stdout, Write};

/// Glyph drawn for a live cell
pub const FILLED: char = '█';
/// Glyph drawn for a dead cell
pub const BLANK: char = ' ';
/// Hard terminal reset (RIS)
const RESET: &str = "\x1bc";

/// Display surface the simulation draws onto.
///
/// Coordinates are 1-indexed, column first. Every call is flushed before it
/// returns.
pub trait Display {
    /// Query the current size as (cols, rows)
    fn dimensions(&mut self) -> io::Result<(u16, u16)>;
    fn clear_screen(&mut self) -> io::Result<()>;
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    /// Move the draw position. Out-of-range coordinates are not checked.
    fn position_cursor(&mut self, x: u16, y: u16) -> io::Result<()>;
    fn fill_cell(&mut self) -> io::Result<()>;
    fn clear_cell(&mut self) -> io::Result<()>;
    /// Reset the terminal to a pristine state. Safe to repeat.
    fn teardown(&mut self) -> io::Result<()>;

    /// Move the cursor back to the top-left corner
    fn reset_cursor(&mut self) -> io::Result<()> {
        self.position_cursor(1, 1)
    }
}

/// Where terminal dimensions come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSource {
    /// Ask the controlling tty every time
    Tty,
    /// Fixed size, for writers that are not a tty
    Fixed(u16, u16),
}

/// Crossterm-backed display driver
pub struct Terminal<W: Write = Stdout> {
    out: W,
    source: SizeSource,
    raw_mode: bool,
}

impl Terminal<Stdout> {
    /// Take over stdout. Raw mode is enabled so keys and resizes arrive as events.
    pub fn new() -> io::Result<Self> {
        // No tty, no display.
        size()?;
        enable_raw_mode()?;

        Ok(Self {
            out: stdout(),
            source: SizeSource::Tty,
            raw_mode: true,
        })
    }
}

impl<W: Write> Terminal<W> {
    /// Draw onto an arbitrary writer
    pub fn with_writer(out: W, source: SizeSource) -> Self {
        Self {
            out,
            source,
            raw_mode: false,
        }
    }

    #[cfg(test)]
    fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Display for Terminal<W> {
    fn dimensions(&mut self) -> io::Result<(u16, u16)> {
        match self.source {
            SizeSource::Tty => size(),
            SizeSource::Fixed(w, h) => Ok((w, h)),
        }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All))
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Show)
    }

    fn position_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        execute!(self.out, MoveTo(x.saturating_sub(1), y.saturating_sub(1)))
    }

    fn fill_cell(&mut self) -> io::Result<()> {
        execute!(self.out, Print(FILLED))
    }

    fn clear_cell(&mut self) -> io::Result<()> {
        execute!(self.out, Print(BLANK))
    }

    fn teardown(&mut self) -> io::Result<()> {
        execute!(self.out, Print(RESET))
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = execute!(self.out, Show);
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(w: u16, h: u16) -> Terminal<Vec<u8>> {
        Terminal::with_writer(Vec::new(), SizeSource::Fixed(w, h))
    }

    fn output(term: &Terminal<Vec<u8>>) -> String {
        String::from_utf8_lossy(term.writer()).into_owned()
    }

    #[test]
    fn position_is_one_indexed() {
        let mut term = fixed(10, 5);
        term.position_cursor(1, 1).unwrap();
        term.position_cursor(4, 2).unwrap();
        assert_eq!(output(&term), "\x1b[1;1H\x1b[2;4H");
    }

    #[test]
    fn position_zero_saturates_to_origin() {
        let mut term = fixed(10, 5);
        term.position_cursor(0, 0).unwrap();
        assert_eq!(output(&term), "\x1b[1;1H");
    }

    #[test]
    fn cells_draw_block_and_space() {
        let mut term = fixed(10, 5);
        term.fill_cell().unwrap();
        term.clear_cell().unwrap();
        assert_eq!(output(&term), "█ ");
    }

    #[test]
    fn cursor_and_clear_sequences() {
        let mut term = fixed(10, 5);
        term.clear_screen().unwrap();
        term.hide_cursor().unwrap();
        term.show_cursor().unwrap();
        assert_eq!(output(&term), "\x1b[2J\x1b[?25l\x1b[?25h");
    }

    #[test]
    fn teardown_twice_is_harmless() {
        let mut once = fixed(10, 5);
        once.teardown().unwrap();

        let mut twice = fixed(10, 5);
        twice.teardown().unwrap();
        twice.teardown().unwrap();

        assert_eq!(output(&once), RESET);
        // The second reset lands on an already pristine terminal.
        assert_eq!(output(&twice), RESET.repeat(2));
    }

    #[test]
    fn fixed_dimensions_are_stable() {
        let mut term = fixed(80, 24);
        assert_eq!(term.dimensions().unwrap(), (80, 24));
        assert_eq!(term.dimensions().unwrap(), (80, 24));
    }
}
