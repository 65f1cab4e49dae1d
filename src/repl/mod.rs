//! REPL Session Machinery
//!
//! A generic read-eval-print session: it wraps one evaluator (an opaque
//! "push a line, get output plus a continuation flag" capability) with
//! prompt/continuation state, a visible transcript, and command history.
//!
//! The session does not know what language it is hosting. Multi-line
//! constructs are driven entirely by the evaluator's `more` flag.

pub mod evaluator;
pub mod history;
pub mod session;

pub use evaluator::{CommandEvaluator, EvalOutcome, Evaluator, GraphOps};
pub use history::CommandHistory;
pub use session::{ReplPrompts, ReplSession};
