//! Line-based output for the dockwire binary.

use std::io::{self, Write};

use crate::models::Event;

/// Render one event as a single line.
///
/// ```text
/// 2013-05-07T12:51:42+00:00 4386fb97867d: (base:latest) start
/// ```
pub fn format_event(event: &Event) -> String {
    let mut line = match event.timestamp() {
        Some(time) => time.to_rfc3339(),
        None => "-".to_string(),
    };

    if !event.id.is_empty() {
        line.push(' ');
        line.push_str(&event.id);
        line.push(':');
    }
    if !event.from.is_empty() {
        line.push_str(&format!(" ({})", event.from));
    }
    if !event.status.is_empty() {
        line.push(' ');
        line.push_str(&event.status);
    }
    if let Some(progress) = &event.progress {
        line.push(' ');
        line.push_str(progress);
    }
    if let Some(error) = &event.error {
        line.push_str(&format!(" error: {}", error.message));
    }
    line
}

/// Write one event line and flush, so followers see it immediately.
pub fn print_event<W: Write>(out: &mut W, event: &Event) -> io::Result<()> {
    writeln!(out, "{}", format_event(event))?;
    out.flush()
}
