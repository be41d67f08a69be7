use super::traits::Logger;

/// `Logger` backed by the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "customers::application", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "customers::application", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "customers::application", "{}", message);
    }
}
