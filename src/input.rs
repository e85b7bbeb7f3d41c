//! External events the simulation reacts to

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Control event delivered to the simulation loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// The terminal window changed size
    Resize,
    /// Shut down and restore the terminal
    Quit,
    /// Freeze or resume the simulation
    TogglePause,
}

/// Source of control events.
pub trait Events {
    /// Block for at most `timeout` waiting for a control event.
    ///
    /// Returns `None` once the full interval has elapsed quietly.
    fn wait(&mut self, timeout: Duration) -> io::Result<Option<Control>>;
}

/// Longest single poll, so a pending quit signal is noticed promptly
const POLL_SLICE: Duration = Duration::from_millis(50);

/// Reads keys and resize notifications from the crossterm event queue.
///
/// Interrupt, terminate and hangup signals are trapped into `quit` and
/// reported as `Control::Quit`.
pub struct CrosstermEvents {
    quit: Arc<AtomicBool>,
}

impl CrosstermEvents {
    /// Trap quit signals and read from the terminal
    pub fn new() -> io::Result<Self> {
        let quit = Arc::new(AtomicBool::new(false));
        register_quit_signals(&quit)?;
        Ok(Self::with_flag(quit))
    }

    /// Use an existing quit flag without touching signal dispositions
    pub fn with_flag(quit: Arc<AtomicBool>) -> Self {
        Self { quit }
    }

    fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }
}

impl Events for CrosstermEvents {
    fn wait(&mut self, timeout: Duration) -> io::Result<Option<Control>> {
        let deadline = Instant::now() + timeout;

        loop {
            if self.quit_requested() {
                return Ok(Some(Control::Quit));
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if !poll(remaining.min(POLL_SLICE))? {
                if remaining <= POLL_SLICE {
                    return Ok(None);
                }
                continue;
            }

            if let Some(control) = translate(&read()?) {
                return Ok(Some(control));
            }

            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }
}

/// Set `flag` on SIGINT, SIGTERM or SIGHUP instead of dying with the
/// terminal still in raw mode
#[cfg(unix)]
pub fn register_quit_signals(flag: &Arc<AtomicBool>) -> io::Result<()> {
    for signal in [SIGINT, SIGTERM, SIGHUP] {
        signal_hook::flag::register(signal, Arc::clone(flag))?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn register_quit_signals(_flag: &Arc<AtomicBool>) -> io::Result<()> {
    Ok(())
}

/// Map a raw terminal event onto a control, ignoring everything else
pub fn translate(event: &Event) -> Option<Control> {
    match event {
        Event::Resize(..) => Some(Control::Resize),
        Event::Key(key) => translate_key(key),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Control> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Control::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Control::Quit),
        KeyCode::Char(' ') => Some(Control::TogglePause),
        _ => None,
    }
}
