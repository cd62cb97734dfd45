//! # Transport Abstraction
//!
//! The blocking interface to the vendor RFC library.
//!
//! ## Philosophy
//!
//! - **Opaque Failures**: Every method fails with a plain `anyhow::Error`. The
//!   transport does not distinguish "bad credentials" from "no such function";
//!   callers classify failures by the operation they attempted.
//! - **Owned Handles**: A connection and the callables looked up on it are
//!   owned exclusively by whoever opened them. Nothing here is shared.

use indexmap::IndexMap;
use rfcapi::FieldSpec;
use rfcapi::Fields;

/// Flat, uppercase-keyed connection parameters (`ASHOST`, `CLIENT`, ...).
pub type ConnectionParams = IndexMap<String, String>;

/// Opens sessions to the remote system.
pub trait Transport: Send + Sync {
    fn open(&self, params: &ConnectionParams) -> anyhow::Result<Box<dyn Connection>>;
}

/// A live session to the remote system.
pub trait Connection: Send {
    /// Checks that the session still answers.
    fn ping(&mut self) -> anyhow::Result<bool>;

    /// Closes the session.
    ///
    /// # Invariants
    /// - Calling this more than once must be a no-op.
    fn close(&mut self);

    /// Resolves a remote function by name.
    fn lookup(&mut self, name: &str) -> anyhow::Result<Box<dyn Callable>>;
}

/// A resolved, invocable remote function.
pub trait Callable: Send {
    /// The function's parameters keyed by name, excluding the function's own
    /// name.
    fn describe(&self) -> anyhow::Result<IndexMap<String, FieldSpec>>;

    /// Runs the function with the given wire inputs.
    ///
    /// # Invariants
    /// - On success every declared output and table is present in the result.
    fn invoke(&mut self, params: &Fields) -> anyhow::Result<Fields>;
}
