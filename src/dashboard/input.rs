//! Background key listener
//!
//! Runs on its own OS thread because terminal reads block. The crossterm
//! source enables raw mode through [`RawModeGuard`], which restores the
//! terminal on every exit path including unwinding. When stdin is not a
//! terminal, or raw mode cannot be enabled, the listener idles until the
//! view is stopped elsewhere.

use super::state::{KeyAction, SharedView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// How long a single key wait may block before `running` is rechecked
pub const KEY_POLL: Duration = Duration::from_millis(100);

/// Sleep between `running` checks when no keyboard is available
pub const IDLE_POLL: Duration = Duration::from_millis(500);

/// A supplier of single keystrokes
pub trait KeySource {
    /// Wait up to `timeout` for one key; `Ok(None)` when none arrived
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<char>>;
}

/// Raw mode held for the guard's lifetime
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        debug!("Raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        } else {
            debug!("Raw mode restored");
        }
    }
}

/// Keys read from the controlling terminal
pub struct TerminalKeys {
    _raw: RawModeGuard,
}

impl TerminalKeys {
    /// Fails when stdin is not a terminal or raw mode is unsupported
    pub fn open() -> io::Result<Self> {
        if !atty::is(atty::Stream::Stdin) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin is not a terminal",
            ));
        }
        Ok(Self {
            _raw: RawModeGuard::enter()?,
        })
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<char>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(match event::read()? {
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers.contains(KeyModifiers::CONTROL) && c.eq_ignore_ascii_case(&'c') {
                    Some('\x03')
                } else {
                    Some(c)
                }
            }
            _ => None,
        })
    }
}

/// Feed keys into the view until it stops running
pub fn listen<K: KeySource + ?Sized>(view: &SharedView, keys: &mut K) -> io::Result<()> {
    while view.is_running() {
        if let Some(ch) = keys.next_key(KEY_POLL)? {
            let action = view.apply_key(ch);
            if action != KeyAction::Ignore {
                trace!("Key {:?} -> {:?}", ch, action);
            }
        }
    }
    Ok(())
}

/// Wait without a keyboard until the view stops running
pub fn idle(view: &SharedView) {
    while view.is_running() {
        thread::sleep(IDLE_POLL);
    }
}

/// Listener body: open a key source, or fall back to idling
pub fn run_listener<K, F>(view: SharedView, open: F)
where
    K: KeySource,
    F: FnOnce() -> io::Result<K>,
{
    match open() {
        Ok(mut keys) => {
            let result = listen(&view, &mut keys);
            // Restore the terminal before any fallback wait
            drop(keys);
            if let Err(e) = result {
                debug!("Key read failed ({}), continuing without keyboard", e);
                idle(&view);
            }
        }
        Err(e) => {
            debug!("Keyboard unavailable ({}), dashboard is keyboard-inert", e);
            idle(&view);
        }
    }
    debug!("Key listener finished");
}

/// Longest wait for the listener to release the terminal on shutdown
pub const LISTENER_JOIN: Duration = Duration::from_millis(600);

/// Handle to the listener thread
///
/// Dropping a handle that was never joined stops the view and waits for the
/// thread, so raw mode is released even when the render side unwinds.
pub struct ListenerHandle {
    view: SharedView,
    handle: Option<JoinHandle<()>>,
}

impl ListenerHandle {
    /// Wait up to `limit` for the thread to finish; `false` if it is still running
    pub fn join_timeout(mut self, limit: Duration) -> bool {
        match self.handle.take() {
            Some(handle) => wait_for(handle, limit),
            None => true,
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.view.stop();
            if !wait_for(handle, LISTENER_JOIN) {
                warn!("Key listener still holds the terminal");
            }
        }
    }
}

fn wait_for(handle: JoinHandle<()>, limit: Duration) -> bool {
    let started = Instant::now();
    while !handle.is_finished() {
        if started.elapsed() >= limit {
            debug!("Key listener still running after {:?}, detaching", limit);
            return false;
        }
        thread::sleep(Duration::from_millis(10));
    }
    if handle.join().is_err() {
        warn!("Key listener panicked");
    }
    true
}

/// Start the listener thread
pub fn spawn_listener<K, F>(view: SharedView, open: F) -> io::Result<ListenerHandle>
where
    K: KeySource,
    F: FnOnce() -> io::Result<K> + Send + 'static,
{
    let listener_view = view.clone();
    let handle = thread::Builder::new()
        .name("mekon-keys".to_string())
        .spawn(move || run_listener(listener_view, open))?;
    Ok(ListenerHandle {
        view,
        handle: Some(handle),
    })
}
