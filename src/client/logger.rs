use super::CallContext;

/// Sink for the two events the client emits per HTTP call.
///
/// `fields` are key/value pairs such as `("method", "POST")` or `("status", "200")`.
/// Implementations must not block.
pub trait Logger: Send + Sync {
    fn log(&self, ctx: &CallContext, message: &str, fields: &[(&'static str, String)]);
}

/// Adapts a closure into a [`Logger`]. Built by [`crate::ClientBuilder::log_fn`].
pub(crate) struct FnLogger<F>(pub(crate) F);

impl<F> Logger for FnLogger<F>
where
    F: Fn(&CallContext, &str, &[(&'static str, String)]) + Send + Sync,
{
    fn log(&self, ctx: &CallContext, message: &str, fields: &[(&'static str, String)]) {
        (self.0)(ctx, message, fields)
    }
}

/// Default logger: forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, ctx: &CallContext, message: &str, fields: &[(&'static str, String)]) {
        let fields = fields
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(
            target: "beem::client",
            label = ctx.label().unwrap_or("-"),
            fields = %fields,
            "{message}"
        );
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _ctx: &CallContext, _message: &str, _fields: &[(&'static str, String)]) {}
}
