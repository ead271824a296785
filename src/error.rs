use thiserror::Error;

/// Errors that can occur while dispatching a pipeline through the engine.
///
/// Every variant maps to one of the error kinds in the system's error design:
/// stack underflow, type coercion, out-of-range slicing, missing variables,
/// failed comparisons, codec failures, and pipeline residuals.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}: expected {1} value(s) on the stack")]
    StackUnderflow(&'static str, usize),

    #[error("Stack empty - integer required")]
    IntegerRequired,

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("Stack empty - string required")]
    StringRequired,

    #[error("Out of range")]
    OutOfRange,

    #[error("Start greater than end")]
    StartGreaterThanEnd,

    #[error("Nil or no value called {0}")]
    MissingVariable(String),

    #[error("call: cannot find {0}")]
    MissingRecipe(String),

    #[error("call: recursion depth exceeded")]
    RecursionDepth,

    #[error("Values not equal")]
    NotEqual,

    #[error("Values not expected to be equal")]
    UnexpectedlyEqual,

    #[error("no data provided to hash")]
    NoDataToHash,

    #[error("no key provided for hmac")]
    NoKeyForHmac,

    #[error("Expected data, IV, and key on the stack")]
    MissingCipherInputs,

    #[error("codec error: {0}")]
    Codec(String),

    #[error("cipher error: {0}")]
    Cipher(String),

    #[error("unknown primitive \"{0}\"")]
    UnknownPrimitive(String),

    #[error("nothing left on the stack to return")]
    NothingToReturn,

    #[error("{0} unused items on stack")]
    UnusedItems(usize),
}

pub type EngineResult<T> = Result<T, EngineError>;
