//! Shutdown signal with interruptible waits.

use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Replacement for `thread::sleep()` in the demo loop: waits can be cut
/// short the moment Ctrl-C fires.
pub struct ShutdownSignal {
    stop: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            stop: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    /// Trigger shutdown, waking every waiting thread.
    pub fn trigger(&self) {
        if let Ok(mut stop) = self.stop.lock() {
            *stop = true;
        }
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        // A poisoned lock means some thread panicked; stop in that case too.
        self.stop.lock().map(|stop| *stop).unwrap_or(true)
    }

    /// Wait for `duration` or until shutdown is triggered. Returns `true`
    /// when shutting down.
    pub fn wait(&self, duration: Duration) -> bool {
        let Ok(guard) = self.stop.lock() else {
            return true;
        };
        match self
            .condvar
            .wait_timeout_while(guard, duration, |stop| !*stop)
        {
            Ok((guard, _)) => *guard,
            Err(_) => true,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
