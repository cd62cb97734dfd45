//! # Function Invoker
//!
//! Owns the connection and callable handle for one remote function and runs
//! calls against it.
//!
//! ## Lifecycle
//!
//! ```text
//! Unbound --connect--> Connected --bind--> Bound --invoke--> Invoked
//!    ^                     |                 |                  |
//!    '---- open failed ----'                 '------ close -----'--> Closed
//! ```
//!
//! Handles are created on first use and reused by every later call. A failed
//! connection attempt leaves the invoker `Unbound`, so the next call retries.
//! `close` releases the callable before the connection, may be called any
//! number of times, and also runs on drop.
//!
//! ## Invariants
//!
//! - Each transport failure is classified right at the call that produced it.
//! - Errors raised by an earlier stage (configuration, connection) reach the
//!   caller unchanged; they are never re-labelled by a later stage.

use std::fmt;
use std::sync::Arc;

use rfcapi::ApiDescriptor;
use rfcapi::Fields;
use rfcapi::ParameterBag;
use tracing::debug;
use tracing::trace;

use crate::config::Config;
use crate::error::Error;
use crate::error::Result;
use crate::transport::Callable;
use crate::transport::Connection;
use crate::transport::Transport;

/// The externally visible lifecycle phase of an invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unbound,
    Connected,
    Bound,
    Invoked,
    Closed,
}

enum State {
    Unbound,
    Connected {
        conn: Box<dyn Connection>,
    },
    Bound {
        conn: Box<dyn Connection>,
        func: Box<dyn Callable>,
        api: ApiDescriptor,
    },
    Closed,
}

/// A callable remote function bound to its own connection.
pub struct FunctionInvoker {
    name: String,
    transport: Arc<dyn Transport>,
    config: Option<Config>,
    state: State,
    invocations: u64,
}

impl FunctionInvoker {
    pub fn new(transport: Arc<dyn Transport>, config: Option<Config>, name: &str) -> Self {
        Self {
            name: name.to_string(),
            transport,
            config,
            state: State::Unbound,
            invocations: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Unbound => Phase::Unbound,
            State::Connected { .. } => Phase::Connected,
            State::Bound { .. } if self.invocations > 0 => Phase::Invoked,
            State::Bound { .. } => Phase::Bound,
            State::Closed => Phase::Closed,
        }
    }

    /// Number of successful calls made so far.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }

    /// Replaces the configuration used for the next connection attempt.
    ///
    /// An already open connection is not affected.
    pub fn set_config(&mut self, config: Config) {
        self.config = Some(config);
    }

    /// Opens the connection unless it is already open.
    pub fn connect(&mut self) -> Result<()> {
        match self.state {
            State::Unbound => {}
            State::Closed => return Err(closed(&self.name)),
            State::Connected { .. } | State::Bound { .. } => return Ok(()),
        }

        let config = self
            .config
            .as_ref()
            .ok_or_else(|| Error::IncompleteConfig("configuration is missing".into()))?;
        let params = config.connection_params()?;

        let conn = self
            .transport
            .open(&params)
            .map_err(|e| Error::connection("connection creation failed", e))?;
        debug!(function = %self.name, "connection opened");

        self.state = State::Connected { conn };
        Ok(())
    }

    /// Resolves the callable handle and extracts its API, connecting first if
    /// needed.
    pub fn bind(&mut self) -> Result<()> {
        self.connect()?;

        let mut conn = match std::mem::replace(&mut self.state, State::Unbound) {
            State::Connected { conn } => conn,
            other => {
                self.state = other;
                return Ok(());
            }
        };

        match resolve(conn.as_mut(), &self.name) {
            Ok((func, api)) => {
                debug!(function = %self.name, elements = api.len(), "function bound");
                self.state = State::Bound { conn, func, api };
                Ok(())
            }
            Err(e) => {
                self.state = State::Connected { conn };
                Err(e)
            }
        }
    }

    /// The function's API description, binding first if needed.
    pub fn api(&mut self) -> Result<&ApiDescriptor> {
        let (_, api) = self.bound()?;
        Ok(api)
    }

    /// Calls the remote function and returns its normalized outputs and tables.
    pub fn invoke(&mut self, params: &ParameterBag) -> Result<Fields> {
        let name = self.name.clone();
        let (func, api) = self.bound()?;

        let wire = rfcapi::build_call(&name, api, params).map_err(|e| marshal_error(&name, e))?;
        trace!(function = %name, inputs = wire.len(), "invoking");

        let raw = func
            .invoke(&wire)
            .map_err(|source| Error::FunctionCall { function: name.clone(), source })?;
        let output = rfcapi::cast_outputs(api, &raw)
            .map_err(|e| Error::FunctionCall { function: name.clone(), source: e.into() })?;

        self.invocations += 1;
        Ok(output)
    }

    /// Checks that the connection answers, connecting first if needed.
    pub fn ping(&mut self) -> Result<bool> {
        self.connect()?;
        match &mut self.state {
            State::Connected { conn } | State::Bound { conn, .. } => {
                conn.ping().map_err(|e| Error::connection("ping failed", e))
            }
            State::Unbound | State::Closed => Err(closed(&self.name)),
        }
    }

    /// Releases the callable handle, then closes the connection.
    pub fn close(&mut self) {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Bound { mut conn, func, .. } => {
                drop(func);
                conn.close();
                debug!(function = %self.name, "connection closed");
            }
            State::Connected { mut conn } => {
                conn.close();
                debug!(function = %self.name, "connection closed");
            }
            State::Unbound | State::Closed => {}
        }
    }

    fn bound(&mut self) -> Result<(&mut Box<dyn Callable>, &ApiDescriptor)> {
        self.bind()?;
        match &mut self.state {
            State::Bound { func, api, .. } => Ok((func, &*api)),
            _ => Err(closed(&self.name)),
        }
    }
}

impl Drop for FunctionInvoker {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for FunctionInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInvoker")
            .field("name", &self.name)
            .field("phase", &self.phase())
            .field("invocations", &self.invocations)
            .finish()
    }
}

fn resolve(conn: &mut dyn Connection, name: &str) -> Result<(Box<dyn Callable>, ApiDescriptor)> {
    let func = conn
        .lookup(name)
        .map_err(|source| Error::UnknownFunction { function: name.to_string(), source })?;

    let introspection = |source: anyhow::Error| Error::ApiIntrospection {
        function: name.to_string(),
        source,
    };
    let fields = func.describe().map_err(introspection)?;
    let api = rfcapi::extract_api(&fields).map_err(|e| introspection(e.into()))?;
    Ok((func, api))
}

fn marshal_error(function: &str, e: rfcapi::Error) -> Error {
    match e {
        rfcapi::Error::MissingParameter { parameter, function } => {
            Error::MissingParameter { parameter, function }
        }
        other => Error::FunctionCall { function: function.to_string(), source: other.into() },
    }
}

fn closed(function: &str) -> Error {
    Error::connection(
        "connection is closed",
        anyhow::anyhow!("function {} has already been closed", function),
    )
}
