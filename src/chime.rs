use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Audible cue played when an interval runs out
pub trait Chime: Send {
    fn play(&self);
}

/// Rings the terminal bell
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::warn!("failed to ring terminal bell: {e}");
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentChime;

impl Chime for SilentChime {
    fn play(&self) {}
}

/// Test chime that counts how often it was played
#[derive(Debug, Default, Clone)]
pub struct CountingChime {
    plays: Arc<AtomicUsize>,
}

impl CountingChime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl Chime for CountingChime {
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}
