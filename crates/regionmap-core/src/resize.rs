// crates/regionmap-core/src/resize.rs

//! Viewport resize debouncing.
//!
//! Hosts report resize notifications with their own clock (milliseconds from
//! any fixed origin), so this works the same natively and in the browser.

#[derive(Debug, Clone)]
pub struct ResizeDebounce {
    delay_ms: u64,
    pending_since: Option<u64>,
    registered: bool,
}

impl ResizeDebounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending_since: None,
            registered: true,
        }
    }

    /// Records a resize notification. Restarts the quiet period.
    pub fn notify(&mut self, now_ms: u64) {
        if self.registered {
            self.pending_since = Some(now_ms);
        }
    }

    /// True once, when the quiet period after the last notification is over.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.pending_since {
            Some(t) if self.registered && now_ms.saturating_sub(t) >= self.delay_ms => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Stops listening; pending and future notifications are ignored.
    pub fn unregister(&mut self) {
        self.registered = false;
        self.pending_since = None;
    }
}
