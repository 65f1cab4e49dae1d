//! REPL Session
//!
//! Turns a sequence of submitted lines into evaluator calls while tracking
//! whether the evaluator is waiting for further lines of the same logical
//! statement, and builds the visible transcript.
//!
//! Evaluator faults are not session-level errors: they are captured into
//! the transcript like any other output, and continuation is forced off so
//! the session never gets stuck mid-block.

use tracing::debug;

use super::evaluator::Evaluator;
use super::history::CommandHistory;

/// Prompt pair shown by a session
#[derive(Debug, Clone)]
pub struct ReplPrompts {
    /// Shown when not awaiting continuation
    pub primary: String,
    /// Shown while the evaluator is mid multi-line construct
    pub continuation: String,
}

impl Default for ReplPrompts {
    fn default() -> Self {
        Self {
            primary: ">>> ".to_string(),
            continuation: "... ".to_string(),
        }
    }
}

/// One interactive session wrapping one evaluator
pub struct ReplSession {
    evaluator: Box<dyn Evaluator + Send>,
    history: CommandHistory,
    prompts: ReplPrompts,
    transcript: String,
    continuation: bool,
}

impl ReplSession {
    /// Create a session around an evaluator, with default prompts
    pub fn new(evaluator: Box<dyn Evaluator + Send>) -> Self {
        Self::with_prompts(evaluator, ReplPrompts::default())
    }

    /// Create a session with custom prompts
    pub fn with_prompts(evaluator: Box<dyn Evaluator + Send>, prompts: ReplPrompts) -> Self {
        Self {
            evaluator,
            history: CommandHistory::new(),
            prompts,
            transcript: String::new(),
            continuation: false,
        }
    }

    /// Create a session with custom prompts and history bound
    pub fn with_options(
        evaluator: Box<dyn Evaluator + Send>,
        prompts: ReplPrompts,
        history_limit: usize,
    ) -> Self {
        Self {
            history: CommandHistory::with_max_size(history_limit),
            ..Self::with_prompts(evaluator, prompts)
        }
    }

    /// The prompt for the next line, selected by continuation state
    pub fn prompt(&self) -> &str {
        if self.continuation {
            &self.prompts.continuation
        } else {
            &self.prompts.primary
        }
    }

    /// Whether the evaluator is awaiting more input of the same statement
    pub fn in_continuation(&self) -> bool {
        self.continuation
    }

    /// Submit one line. Returns the transcript delta this submission
    /// produced: the echoed prompt + line, then captured stdout and stderr
    /// in that order.
    pub fn submit(&mut self, line: &str) -> String {
        let mut delta = String::new();
        delta.push_str(self.prompt());
        delta.push_str(line);
        delta.push('\n');

        self.history.push(line);
        self.history.reset_cursor();

        match self.evaluator.push(line) {
            Ok(outcome) => {
                delta.push_str(&outcome.stdout);
                delta.push_str(&outcome.stderr);
                self.continuation = outcome.more;
            }
            Err(err) => {
                debug!(error = %err, "evaluator fault");
                delta.push_str(&format!("ERROR: {}\n", err));
                self.continuation = false;
            }
        }

        self.transcript.push_str(&delta);
        delta
    }

    /// Browse history toward older entries
    pub fn history_up(&mut self) -> String {
        self.history.up()
    }

    /// Browse history toward newer entries
    pub fn history_down(&mut self) -> String {
        self.history.down()
    }

    /// The full visible transcript so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of recorded history entries
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
