//! Fault-capture instrumentation.
//!
//! Inserts a small script right after the document's `<head>` tag. Inside
//! the isolated frame it installs two hooks that post fault envelopes to the
//! parent context:
//!
//! - `window.onerror` → `Error: {message} (line {line}, col {col})`, and
//!   suppresses the frame's default error reporting.
//! - `unhandledrejection` → `Unhandled Promise Rejection: {reason}`.

use std::sync::LazyLock;

use regex::Regex;

use crate::fault::RUNTIME_ERROR;

static HEAD_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<head>").expect("head pattern is valid"));

/// Marker present once in every preamble; lets callers detect instrumentation.
pub const PREAMBLE_MARKER: &str = "data-live-preview-faults";

/// Build the fault-capture preamble.
///
/// With `generation` set, every envelope carries a `generation` field so
/// the host can drop faults from superseded renders.
pub fn preamble(generation: Option<u64>) -> String {
    let tag = match generation {
        Some(g) => format!(", generation: {g}"),
        None => String::new(),
    };
    format!(
        r#"
<script {PREAMBLE_MARKER}>
  window.onerror = function(message, source, lineno, colno, error) {{
    window.parent.postMessage({{
      type: '{RUNTIME_ERROR}',
      error: `Error: ${{message}} (line ${{lineno}}, col ${{colno}})`{tag}
    }}, '*');
    return true;
  }};

  window.addEventListener('unhandledrejection', function(event) {{
    window.parent.postMessage({{
      type: '{RUNTIME_ERROR}',
      error: `Unhandled Promise Rejection: ${{event.reason}}`{tag}
    }}, '*');
  }});
</script>
"#
    )
}

/// Insert `preamble` after the first case-insensitive `<head>`.
///
/// Documents without a `<head>` tag are returned unchanged.
pub fn inject_preamble(html: &str, preamble: &str) -> String {
    match HEAD_OPEN.find(html) {
        Some(head) => {
            let mut out = String::with_capacity(html.len() + preamble.len());
            out.push_str(&html[..head.end()]);
            out.push_str(preamble);
            out.push_str(&html[head.end()..]);
            out
        }
        None => html.to_string(),
    }
}

/// Whether `html` contains a `<head>` tag the preamble can attach to.
pub fn has_head(html: &str) -> bool {
    HEAD_OPEN.is_match(html)
}
