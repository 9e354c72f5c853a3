//! Log and text-change callback system.
//!
//! The library never prints. Diagnostics (markup recovery, rejected drops,
//! session commits) go to the log callback; caret and text changes made
//! during an edit session go to the event callback, which accessibility
//! layers use to announce edits.

use std::sync::{Mutex, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A change made through an edit session.
///
/// Positions are linear character positions, counting one unit per line
/// break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextEvent {
    CursorChanged {
        position: usize,
    },
    TextInserted {
        start: usize,
        end: usize,
        text: String,
    },
    TextRemoved {
        start: usize,
        end: usize,
        text: String,
    },
}

type EventCallback = Box<dyn Fn(&TextEvent) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global text event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&TextEvent) + Send + Sync + 'static,
{
    if let Ok(mut guard) = event_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Remove the global text event callback.
pub fn clear_event_callback() {
    if let Ok(mut guard) = event_callback().lock() {
        *guard = None;
    }
}

/// Emit a text event to the registered callback.
pub fn emit_event(event: &TextEvent) {
    if let Ok(guard) = event_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    if let Ok(mut guard) = log_callback().lock() {
        *guard = Some(Box::new(callback));
    }
}

/// Emit a log message.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = log_callback().lock() {
        if let Some(callback) = guard.as_ref() {
            callback(level, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_event_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        set_event_callback(move |event| {
            if let TextEvent::TextInserted { text, .. } = event {
                if text == "fermata lunga" {
                    seen_clone.lock().unwrap().push(event.clone());
                }
            }
        });
        emit_event(&TextEvent::TextInserted {
            start: 0,
            end: 20,
            text: "fermata lunga".into(),
        });
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_log_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        set_log_callback(move |level, msg| {
            if msg == "tempo marking set" {
                seen_clone.lock().unwrap().push(level);
            }
        });
        emit_log(LogLevel::Info, "tempo marking set");
        assert_eq!(seen.lock().unwrap().as_slice(), &[LogLevel::Info]);
    }
}
