//! QuickJS-backed script host

use super::{ScriptError, ScriptHost};
use crate::console::Severity;
use rquickjs::{
    convert::Coerced, function::Rest, Context, Ctx, FromJs, Function, Object, Runtime, Value,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

type Captured = Rc<RefCell<Vec<(Severity, String)>>>;

/// Time limit used by [`QuickJsHost::new`]
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(5);

/// Runs script files in an embedded QuickJS runtime.
///
/// Each evaluation gets a fresh context, so globals from one run do not leak
/// into the next. The context provides `console.log/info/warn/error` and
/// `alert`, all routed to the caller's output. A run that exceeds the time
/// limit is interrupted and reported as [`ScriptError::TimedOut`].
pub struct QuickJsHost {
    runtime: Runtime,
    time_limit: Duration,
    /// Set while a script runs; checked by the runtime's interrupt handler
    deadline: Arc<Mutex<Option<Instant>>>,
}

impl QuickJsHost {
    pub fn new() -> Result<Self, ScriptError> {
        Self::with_time_limit(DEFAULT_TIME_LIMIT)
    }

    pub fn with_time_limit(time_limit: Duration) -> Result<Self, ScriptError> {
        let runtime = Runtime::new().map_err(|e| ScriptError::Unavailable(e.to_string()))?;
        let deadline: Arc<Mutex<Option<Instant>>> = Arc::default();
        let watched = Arc::clone(&deadline);
        runtime.set_interrupt_handler(Some(Box::new(move || {
            watched
                .lock()
                .map(|d| d.is_some_and(|at| Instant::now() >= at))
                .unwrap_or(false)
        })));
        Ok(QuickJsHost {
            runtime,
            time_limit,
            deadline,
        })
    }

    fn set_deadline(&self, deadline: Option<Instant>) {
        if let Ok(mut slot) = self.deadline.lock() {
            *slot = deadline;
        }
    }
}

impl ScriptHost for QuickJsHost {
    fn evaluate(
        &mut self,
        name: &str,
        source: &str,
        output: &mut Vec<(Severity, String)>,
    ) -> Result<(), ScriptError> {
        let context =
            Context::full(&self.runtime).map_err(|e| ScriptError::Unavailable(e.to_string()))?;
        let captured: Captured = Rc::default();

        let started = Instant::now();
        self.set_deadline(Some(started + self.time_limit));
        let result = context.with(|ctx| {
            install_console(&ctx, &captured).map_err(|e| ScriptError::Unavailable(e.to_string()))?;
            match ctx.eval::<Value, _>(source) {
                Ok(_) => Ok(()),
                Err(err) => {
                    let message = exception_message(&ctx, err);
                    if started.elapsed() >= self.time_limit {
                        tracing::warn!(script = name, limit = ?self.time_limit, "script interrupted");
                        return Err(ScriptError::TimedOut(self.time_limit));
                    }
                    tracing::debug!(script = name, "script threw: {}", message);
                    Err(ScriptError::Thrown { message })
                }
            }
        });
        self.set_deadline(None);

        output.append(&mut captured.borrow_mut());
        result
    }
}

/// Install `console` and `alert` globals that record into `sink` and also
/// forward to `tracing`
fn install_console<'js>(ctx: &Ctx<'js>, sink: &Captured) -> rquickjs::Result<()> {
    let console = Object::new(ctx.clone())?;
    let methods = [
        ("log", Severity::Neutral),
        ("info", Severity::Neutral),
        ("warn", Severity::Emphasis),
        ("error", Severity::Error),
    ];
    for (method, severity) in methods {
        let sink = Rc::clone(sink);
        console.set(
            method,
            Function::new(ctx.clone(), move |ctx: Ctx<'js>, args: Rest<Value<'js>>| {
                let line = join_args(&ctx, &args.0);
                tracing::info!(target: "console", "console.{}: {}", method, line);
                sink.borrow_mut().push((severity, line));
            })?,
        )?;
    }

    let globals = ctx.globals();
    globals.set("console", console)?;

    let sink = Rc::clone(sink);
    globals.set(
        "alert",
        Function::new(ctx.clone(), move |ctx: Ctx<'js>, args: Rest<Value<'js>>| {
            let line = join_args(&ctx, &args.0);
            tracing::info!(target: "console", "alert: {}", line);
            sink.borrow_mut().push((Severity::Emphasis, line));
        })?,
    )?;
    Ok(())
}

fn join_args<'js>(ctx: &Ctx<'js>, args: &[Value<'js>]) -> String {
    args.iter()
        .map(|value| display_value(ctx, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Objects are shown as JSON, everything else as JS `String(value)` would
fn display_value<'js>(ctx: &Ctx<'js>, value: &Value<'js>) -> String {
    if value.is_object() && !value.is_function() {
        match ctx.json_stringify(value.clone()) {
            Ok(Some(json)) => {
                if let Ok(json) = json.to_string() {
                    return json;
                }
            }
            Ok(None) => return "undefined".to_string(),
            // Cyclic structures; JSON.stringify threw, so drop that exception
            Err(_) => {
                let _ = ctx.catch();
            }
        }
    }
    match Coerced::<String>::from_js(ctx, value.clone()) {
        Ok(Coerced(text)) => text,
        Err(_) => format!("[{}]", value.type_name()),
    }
}

/// The message of whatever the script threw
fn exception_message(ctx: &Ctx<'_>, err: rquickjs::Error) -> String {
    if !err.is_exception() {
        return err.to_string();
    }
    let thrown = ctx.catch();
    if let Some(exception) = thrown.as_exception() {
        return exception
            .message()
            .unwrap_or_else(|| "Unknown error".to_string());
    }
    display_value(ctx, &thrown)
}
