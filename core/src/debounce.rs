//! Duplicate suppression for overlapping analysis windows
//!
//! Half-overlapping windows see each sustained tone several times. The
//! debounce filter emits a symbol only when it differs from the last
//! emitted one; windows with no detection leave the state untouched, so
//! a tone interrupted by an undetected window is still not re-emitted.

/// Emit-on-change filter over per-window detections
#[derive(Debug, Default)]
pub struct DebounceFilter {
    last_emitted: Option<char>,
}

impl DebounceFilter {
    pub fn new() -> Self {
        Self { last_emitted: None }
    }

    /// Feed one window's detection, returning the symbol to emit if any
    pub fn push(&mut self, detected: Option<char>) -> Option<char> {
        let symbol = detected?;
        if self.last_emitted == Some(symbol) {
            return None;
        }
        self.last_emitted = Some(symbol);
        Some(symbol)
    }
}
