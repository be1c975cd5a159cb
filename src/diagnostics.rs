//! Diagnostics sink injected into validators and flows
//!
//! Validators report recoverable problems (failed remote lookups, unknown
//! catalog entries) here instead of logging globally, so they stay testable.

use std::sync::Mutex;

/// Receiver for low-verbosity diagnostic messages
pub trait Diagnostics: Send + Sync {
    fn debug(&self, message: &str);
}

/// Forwards diagnostics to `tracing` at debug level
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "compwiz::diagnostics", "{}", message);
    }
}

/// Captures diagnostics for assertions
#[allow(dead_code)]
pub struct MockDiagnostics {
    messages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockDiagnostics {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains(fragment))
    }
}

impl Default for MockDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics for MockDiagnostics {
    fn debug(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
