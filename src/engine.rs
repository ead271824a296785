//! The stack machine that drives a pipeline: tokenise, dispatch each token
//! to a registered primitive or push it as a literal, and collect the
//! single remaining value.

use tracing::instrument;

use crate::error::{EngineError, EngineResult};
use crate::recipes;
use crate::registry;
use crate::stack::Stack;
use crate::store::VariableStore;

/// `call` re-enters the driver recursively through stored recipes; this
/// caps the depth so a self-referential variable can't loop forever.
const MAX_CALL_DEPTH: u32 = 32;

#[derive(Debug)]
pub struct Engine {
    pub(crate) stack: Stack,
    store: VariableStore,
    pub debug_mode: bool,
    pub(crate) log_buf: String,
    call_depth: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        let mut e = Engine {
            stack: Stack::new(),
            store: VariableStore::new(),
            debug_mode: false,
            log_buf: String::new(),
            call_depth: 0,
        };
        e.reset();
        e
    }

    /// Returns the engine to its initial state, re-seeding the built-in
    /// recipes and the default key.
    pub fn reset(&mut self) {
        self.stack = Stack::new();
        self.store.clear();
        self.log_buf.clear();
        self.debug_mode = false;
        self.call_depth = 0;
        recipes::seed(&mut self.store);
    }

    pub fn set_variable(&mut self, name: &str, value: Vec<u8>) {
        self.store.set(name, value);
    }

    pub fn get_variable(&self, name: &str) -> Option<&[u8]> {
        self.store.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&String, &Vec<u8>)> {
        self.store.iter()
    }

    /// Seeds the stack with the initial value the pipeline operates on.
    pub fn push_stack(&mut self, value: Vec<u8>) {
        self.stack.push(value);
    }

    /// Runs a pipeline to completion, returning the single remaining
    /// stack value. In debug mode, pipeline errors and residual-stack
    /// conditions are captured into the trace instead of aborting, and the
    /// HTML trace document is returned in place of the normal result.
    #[instrument(skip(self, commands), fields(debug_mode = self.debug_mode))]
    pub fn run(&mut self, commands: &[String]) -> EngineResult<Vec<u8>> {
        if self.debug_mode {
            self.log_buf.push_str(crate::debug::HTML_HEADER);
        }

        if let Err(err) = self.exec(commands) {
            if self.debug_mode {
                self.log_error(&err);
            } else {
                return Err(err);
            }
        }

        self.log_stack();

        let mut result = self.stack.pop();
        if result.is_none() {
            let err = EngineError::NothingToReturn;
            if self.debug_mode {
                self.log_error(&err);
            } else {
                return Err(err);
            }
        }

        if !self.stack.is_empty() {
            let err = EngineError::UnusedItems(self.stack.len());
            if self.debug_mode {
                self.log_error(&err);
            } else {
                return Err(err);
            }
        }

        if self.debug_mode {
            self.log_buf.push_str(crate::debug::HTML_FOOTER);
            result = Some(std::mem::take(&mut self.log_buf).into_bytes());
        }

        Ok(result.unwrap_or_default())
    }

    /// Dispatches each token per the registry: a match invokes the
    /// primitive, anything else is pushed as a literal. An empty token
    /// list is a no-op.
    pub fn exec(&mut self, commands: &[String]) -> EngineResult<()> {
        self.log(format!("exec /{}", commands.join("/")));
        for token in commands {
            self.log_stack();
            let trimmed = token.trim();
            if let Some(info) = registry::lookup(trimmed) {
                self.logf(format!("({}) -> {} -> ({})", info.input, trimmed, info.output));
                (info.run)(self)?;
            } else {
                self.logf(format!("push {token:?}"));
                self.stack.push(token.clone().into_bytes());
            }
        }
        self.log("end");
        Ok(())
    }

    /// Entry point used by `call`: re-enters `exec` under the recursion
    /// depth cap.
    pub(crate) fn exec_nested(&mut self, commands: &[String]) -> EngineResult<()> {
        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(EngineError::RecursionDepth);
        }
        self.call_depth += 1;
        let result = self.exec(commands);
        self.call_depth -= 1;
        result
    }
}
