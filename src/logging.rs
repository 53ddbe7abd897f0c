use std::fmt;

/// Request-scoped logging interface.
///
/// `RequestLog` is obtained from [`Ctx::log`](crate::Ctx::log) and is
/// lifetime-bound to that context. Every event it emits carries the
/// `request_id` field so controller activity can be correlated per request.
#[derive(Debug, Clone, Copy)]
pub struct RequestLog<'a> {
    request_id: &'a str,
}

impl<'a> RequestLog<'a> {
    /// Creates a new RequestLog for a request ID.
    ///
    /// This is `pub(crate)` - only `Ctx` can create it.
    pub(crate) fn new(request_id: &'a str) -> Self {
        Self { request_id }
    }

    /// Returns the request ID associated with this logger.
    pub fn request_id(&self) -> &str {
        self.request_id
    }

    /// Logs an info-level message with request ID.
    ///
    /// Use with `format_args!`:
    /// ```no_run
    /// # use customer_guard::RequestLog;
    /// # fn example(log: &RequestLog<'_>) {
    /// log.info(format_args!("customer {} saved", 42));
    /// # }
    /// ```
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a warning-level message with request ID.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, "{}", args);
    }

    /// Logs an error-level message with request ID.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(request_id = %self.request_id, "{}", args);
    }

    /// Logs a debug-level message with request ID.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, "{}", args);
    }
}
