//! Console progress feedback for blocking database calls.
//!
//! `Spinner` animates a single console line from a background thread
//! while the caller blocks on a connection or query. `StepTimer` prints
//! elapsed wall-clock time when dropped, so the report survives early
//! returns, errors, and panics alike.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const FRAMES: [char; 4] = ['-', '\\', '|', '/'];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// A rotating-glyph indicator drawn on one console line.
///
/// The background thread owns the drawing. Shared state is limited to
/// the run flag it polls and the drew-anything flag it sets; `stop`
/// clears the flag, joins the thread, and erases the line.
pub struct Spinner {
    running: Arc<AtomicBool>,
    drew: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    erase_width: usize,
}

impl Spinner {
    /// Starts the animation thread rendering `message` and a glyph.
    pub fn start(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let drew = Arc::new(AtomicBool::new(false));
        let erase_width = message.chars().count() + 2;

        let run_flag = Arc::clone(&running);
        let drew_flag = Arc::clone(&drew);
        let message = message.to_string();
        let handle = thread::spawn(move || {
            let mut frame = 0usize;
            while run_flag.load(Ordering::Acquire) {
                print!("\r{} {}", message, FRAMES[frame % FRAMES.len()]);
                let _ = io::stdout().flush();
                drew_flag.store(true, Ordering::Release);
                frame += 1;
                thread::sleep(FRAME_INTERVAL);
            }
        });

        Self {
            running,
            drew,
            handle: Some(handle),
            erase_width,
        }
    }

    /// Signals the thread to stop, waits for it, and erases the line if
    /// anything was drawn.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            if self.drew.load(Ordering::Acquire) {
                print!("\r{}\r", " ".repeat(self.erase_width));
                let _ = io::stdout().flush();
            }
        }
    }
}

// The thread must not outlive the spinner even if `stop` is never called.
impl Drop for Spinner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Prints `"{label} {secs:.2} seconds."` when dropped.
pub struct StepTimer {
    label: String,
    started: Instant,
}

impl StepTimer {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            started: Instant::now(),
        }
    }
}

impl Drop for StepTimer {
    fn drop(&mut self) {
        println!(
            "{} {:.2} seconds.",
            self.label,
            self.started.elapsed().as_secs_f64()
        );
    }
}
