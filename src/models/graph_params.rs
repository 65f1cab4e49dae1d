//! Lissajous Parameter Set
//!
//! The shared parameter set behind every view: six named numeric fields
//! describing the parametric curve
//!
//! ```text
//! x(t) = A * sin(a*t + delta)
//! y(t) = B * sin(b*t)
//! ```
//!
//! Parameter names form a fixed vocabulary; unknown names are rejected
//! rather than silently created. Presets are fixed full assignments and
//! are applied all-or-nothing.

use std::collections::HashMap;
use std::f64::consts::PI;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Recognized parameter names, in snapshot iteration order
pub const PARAM_NAMES: [&str; 6] = ["a", "b", "A", "B", "delta", "points"];

/// Recognized preset names
pub const PRESET_NAMES: [&str; 5] = ["circle", "figure8", "lissajous", "star", "bowtie"];

/// Minimum number of curve sample points
const MIN_POINTS: u32 = 2;

/// The Lissajous curve parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphParams {
    /// x frequency
    pub a: f64,
    /// y frequency
    pub b: f64,
    /// x amplitude (parameter name `A`)
    #[serde(rename = "A")]
    pub amp_a: f64,
    /// y amplitude (parameter name `B`)
    #[serde(rename = "B")]
    pub amp_b: f64,
    /// phase shift
    pub delta: f64,
    /// number of sample points (always >= 2)
    pub points: u32,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            a: 3.0,
            b: 2.0,
            amp_a: 1.0,
            amp_b: 1.0,
            delta: PI / 2.0,
            points: 1000,
        }
    }
}

/// Fixed preset table. Values are part of the design, not user-editable.
static PRESETS: Lazy<HashMap<&'static str, GraphParams>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "circle",
        GraphParams { a: 1.0, b: 1.0, amp_a: 1.0, amp_b: 1.0, delta: PI / 2.0, points: 1000 },
    );
    table.insert(
        "figure8",
        GraphParams { a: 1.0, b: 2.0, amp_a: 1.0, amp_b: 1.0, delta: 0.0, points: 1000 },
    );
    table.insert(
        "lissajous",
        GraphParams { a: 3.0, b: 2.0, amp_a: 1.0, amp_b: 1.0, delta: PI / 2.0, points: 1000 },
    );
    table.insert(
        "star",
        GraphParams { a: 5.0, b: 6.0, amp_a: 1.0, amp_b: 1.0, delta: PI / 2.0, points: 1000 },
    );
    table.insert(
        "bowtie",
        GraphParams { a: 2.0, b: 3.0, amp_a: 1.0, amp_b: 1.0, delta: PI / 4.0, points: 1000 },
    );
    table
});

impl GraphParams {
    /// Set a single parameter by name.
    ///
    /// Fails without mutating state if `name` is not one of the six
    /// recognized names, or if the value fails the field's validity rules
    /// (`points` must round to an integer >= 2).
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        match name {
            "a" => self.a = value,
            "b" => self.b = value,
            "A" => self.amp_a = value,
            "B" => self.amp_b = value,
            "delta" => self.delta = value,
            "points" => self.points = validate_points(value)?,
            _ => {
                return Err(Error::UnknownParameter {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Get a parameter by name. `points` is returned as a float.
    pub fn get(&self, name: &str) -> Result<f64> {
        match name {
            "a" => Ok(self.a),
            "b" => Ok(self.b),
            "A" => Ok(self.amp_a),
            "B" => Ok(self.amp_b),
            "delta" => Ok(self.delta),
            "points" => Ok(f64::from(self.points)),
            _ => Err(Error::UnknownParameter {
                name: name.to_string(),
            }),
        }
    }

    /// Overwrite all six fields from the named preset.
    ///
    /// All-or-nothing: on an unknown name the parameter set is untouched.
    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        match PRESETS.get(name) {
            Some(preset) => {
                *self = *preset;
                Ok(())
            }
            None => Err(Error::UnknownPreset {
                name: name.to_string(),
            }),
        }
    }

    /// Look up a preset without applying it.
    pub fn preset(name: &str) -> Option<GraphParams> {
        PRESETS.get(name).copied()
    }

    /// Evaluate the curve at parameter `t`. Pure function of current state.
    pub fn evaluate(&self, t: f64) -> (f64, f64) {
        (
            self.amp_a * (self.a * t + self.delta).sin(),
            self.amp_b * (self.b * t).sin(),
        )
    }

    /// All parameters as (name, value) pairs in fixed order:
    /// a, b, A, B, delta, points.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("a", self.a),
            ("b", self.b),
            ("A", self.amp_a),
            ("B", self.amp_b),
            ("delta", self.delta),
            ("points", f64::from(self.points)),
        ]
    }
}

/// Validate a raw `points` value: finite and rounding to an integer >= 2.
fn validate_points(value: f64) -> Result<u32> {
    if !value.is_finite() {
        return Err(Error::InvalidValue {
            name: "points".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }
    let rounded = value.round();
    if rounded < f64::from(MIN_POINTS) || rounded > f64::from(u32::MAX) {
        return Err(Error::InvalidValue {
            name: "points".to_string(),
            reason: format!("must be an integer >= {}", MIN_POINTS),
        });
    }
    Ok(rounded as u32)
}
