//! Routing-sentinel parsing.
//!
//! The orchestrator model signals a hand-off by embedding a literal
//! sentinel anywhere in its output. Scanning and stripping it is isolated
//! here so the user never sees the marker regardless of where the model
//! puts it.

use crate::prompt::persona::REFER_SENTINEL;

/// Scan `text` for the referral sentinel. Returns the text with every
/// occurrence removed (whitespace-trimmed) and whether a hand-off was
/// signalled.
pub fn parse_routing_signal(text: &str) -> (String, bool) {
    if !text.contains(REFER_SENTINEL) {
        return (text.to_string(), false);
    }
    let cleaned = text.replace(REFER_SENTINEL, "");
    (cleaned.trim().to_string(), true)
}
