//! Plugin Control Protocol
//!
//! Pure parse/format of the line-oriented control protocol spoken by
//! helper processes. No I/O here.
//!
//! The protocol is one-directional and carries exactly two message shapes:
//!
//! ```text
//! SET <name> <value>
//! PRESET <name>
//! ```
//!
//! Malformed lines are noise, not errors: they yield no message and are
//! dropped by the caller. Unknown parameter/preset names still parse; the
//! store rejects them downstream.

use crate::models::GraphParams;

/// A message decoded from one control-protocol line
#[derive(Debug, Clone, PartialEq)]
pub enum ControlMessage {
    /// `SET <name> <value>` — set a single parameter
    Set { name: String, value: f64 },
    /// `PRESET <name>` — apply a full preset
    Preset { name: String },
}

/// Parse one `\n`-stripped protocol line.
///
/// Returns `None` for anything that is not exactly a `SET` line with a
/// clean real-number value or a `PRESET` line. Token counts are strict:
/// trailing garbage invalidates the line.
pub fn parse_line(text: &str) -> Option<ControlMessage> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.as_slice() {
        ["SET", name, value] => {
            // f64::from_str rejects trailing garbage, which is exactly
            // the framing contract: "SET a 5.0x" is noise.
            let value: f64 = value.parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            Some(ControlMessage::Set {
                name: (*name).to_string(),
                value,
            })
        }
        ["PRESET", name] => Some(ControlMessage::Preset {
            name: (*name).to_string(),
        }),
        _ => None,
    }
}

/// Serialize the five real-valued fields as the startup argument string
/// for a freshly launched helper: `a b delta A B`, fixed order, six
/// decimal places.
pub fn format_args(params: &GraphParams) -> String {
    format!(
        "{:.6} {:.6} {:.6} {:.6} {:.6}",
        params.a, params.b, params.delta, params.amp_a, params.amp_b
    )
}
