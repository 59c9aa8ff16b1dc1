//! Cooperative cancellation
//!
//! The Ctrl-C handler only flips a flag; long-running loops poll it between
//! files and bail out with [`ContextError::Interrupted`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{ContextError, Result};

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag and register it as the process Ctrl-C handler.
    ///
    /// Registration can only happen once per process; a failure is logged and
    /// the run continues without cancellation support.
    pub fn install() -> Self {
        let interrupt = Self::new();
        let flag = Arc::clone(&interrupt.flag);
        if let Err(err) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            tracing::warn!("failed to install interrupt handler: {err}");
        }
        interrupt
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_triggered() {
            Err(ContextError::Interrupted)
        } else {
            Ok(())
        }
    }
}
