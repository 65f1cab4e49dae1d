//! Evaluator Capability
//!
//! The seam between the generic REPL session and whatever language it
//! hosts. An [`Evaluator`] consumes one line at a time and reports whether
//! it needs more input to complete the current construct, plus whatever
//! output the line produced.
//!
//! [`CommandEvaluator`] is the built-in language: a small fixed command set
//! over an injected [`GraphOps`] capability (set / get / list / preset /
//! eval / launch). Lines ending in `\` continue onto the next line.

use crate::error::{Error, Result};
use crate::plugin::PluginKind;

/// Result of pushing one line into an evaluator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalOutcome {
    /// True while the evaluator is mid multi-line construct
    pub more: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured error output
    pub stderr: String,
}

/// An opaque "push a line, get output plus a continuation flag" capability
pub trait Evaluator {
    /// Feed one submitted line. An `Err` is a syntax or runtime fault of
    /// the hosted language; the session captures it into the transcript's
    /// error stream and forces continuation off.
    fn push(&mut self, line: &str) -> Result<EvalOutcome>;
}

/// The fixed set of named graph operations exposed to an evaluator.
///
/// Passed in at construction rather than resolved through globals, so
/// multiple sessions and tests can coexist.
pub trait GraphOps {
    /// Set one parameter by name
    fn set_param(&self, name: &str, value: f64) -> Result<()>;
    /// Read one parameter by name
    fn get_param(&self, name: &str) -> Result<f64>;
    /// All parameters in fixed order
    fn list_params(&self) -> [(&'static str, f64); 6];
    /// Apply a named preset atomically
    fn apply_preset(&self, name: &str) -> Result<()>;
    /// Evaluate the curve at `t`
    fn evaluate(&self, t: f64) -> (f64, f64);
    /// Request a helper plugin launch; the outcome is a plain boolean
    fn launch_plugin(&self, kind: PluginKind) -> bool;
}

/// Built-in command evaluator over a [`GraphOps`] capability
pub struct CommandEvaluator<O: GraphOps> {
    ops: O,
    /// Lines of the current multi-line construct, joined on completion
    pending: String,
}

impl<O: GraphOps> CommandEvaluator<O> {
    /// Create an evaluator bound to the given capability
    pub fn new(ops: O) -> Self {
        Self {
            ops,
            pending: String::new(),
        }
    }

    fn execute(&self, command: &str) -> Result<String> {
        let tokens: Vec<&str> = command.split_whitespace().collect();
        match tokens.as_slice() {
            [] => Ok(String::new()),
            ["set", name, value] => {
                let value = parse_number(value)?;
                self.ops.set_param(name, value)?;
                Ok(String::new())
            }
            ["get", name] => {
                let value = self.ops.get_param(name)?;
                Ok(format!("{}\n", value))
            }
            ["params"] => {
                let mut out = String::new();
                for (name, value) in self.ops.list_params() {
                    out.push_str(&format!("{} = {}\n", name, value));
                }
                Ok(out)
            }
            ["preset", name] => {
                self.ops.apply_preset(name)?;
                Ok(String::new())
            }
            ["eval", t] => {
                let t = parse_number(t)?;
                let (x, y) = self.ops.evaluate(t);
                Ok(format!("({}, {})\n", x, y))
            }
            ["launch", kind] => {
                let kind: PluginKind = kind.parse()?;
                if self.ops.launch_plugin(kind) {
                    Ok(format!("{} plugin running\n", kind))
                } else {
                    Err(Error::Evaluator {
                        message: format!("could not launch {} plugin", kind),
                    })
                }
            }
            ["help"] => Ok(HELP_TEXT.to_string()),
            [command, ..] => Err(Error::Evaluator {
                message: format!("unknown command '{}'; try 'help'", command),
            }),
        }
    }
}

impl<O: GraphOps> Evaluator for CommandEvaluator<O> {
    fn push(&mut self, line: &str) -> Result<EvalOutcome> {
        // A trailing backslash continues the statement on the next line.
        if let Some(stripped) = line.strip_suffix('\\') {
            self.pending.push_str(stripped);
            return Ok(EvalOutcome {
                more: true,
                ..EvalOutcome::default()
            });
        }

        let full = if self.pending.is_empty() {
            line.to_string()
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.push_str(line);
            joined
        };

        match self.execute(full.trim()) {
            Ok(stdout) => Ok(EvalOutcome {
                more: false,
                stdout,
                stderr: String::new(),
            }),
            Err(err) => {
                // A failed statement never leaves a dangling construct.
                self.pending.clear();
                Err(err)
            }
        }
    }
}

fn parse_number(text: &str) -> Result<f64> {
    text.parse().map_err(|_| Error::Evaluator {
        message: format!("not a number: '{}'", text),
    })
}

const HELP_TEXT: &str = "\
commands:
  set <param> <value>   set a parameter (a, b, A, B, delta, points)
  get <param>           read a parameter
  params                list all parameters
  preset <name>         apply a preset (circle, figure8, lissajous, star, bowtie)
  eval <t>              evaluate the curve at t -> (x, y)
  launch <tk|tkinter>   launch a slider plugin process
  help                  show this text
lines ending in \\ continue on the next line
";
