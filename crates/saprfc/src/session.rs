//! # Sessions
//!
//! A standalone connection to the remote system, used for liveness checks
//! and as a factory for [`FunctionInvoker`]s sharing its configuration.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::error::Result;
use crate::invoker::FunctionInvoker;
use crate::transport::Connection;
use crate::transport::Transport;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub struct Session {
    id: u64,
    transport: Arc<dyn Transport>,
    config: Config,
    conn: Option<Box<dyn Connection>>,
}

impl Session {
    pub fn new(transport: Arc<dyn Transport>, config: Config) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            transport,
            config,
            conn: None,
        }
    }

    /// Process-unique id of this session.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Opens a fresh connection, closing any open one first.
    pub fn connect(&mut self) -> Result<()> {
        self.close();
        self.conn = Some(self.open()?);
        Ok(())
    }

    /// Checks that the connection answers, connecting first if needed.
    pub fn ping(&mut self) -> Result<bool> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        let id = self.id;
        self.conn
            .insert(conn)
            .ping()
            .map_err(|e| Error::connection(format!("connection {} ping failed", id), e))
    }

    /// Closes the connection; does nothing when not connected.
    pub fn close(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            conn.close();
            debug!(session = self.id, "closed");
        }
    }

    fn open(&self) -> Result<Box<dyn Connection>> {
        let params = self.config.connection_params()?;
        let conn = self.transport.open(&params).map_err(|e| {
            Error::connection(format!("connection {} creation failed", self.id), e)
        })?;
        debug!(session = self.id, "connected");
        Ok(conn)
    }

    /// Prepares a call of the named function on its own connection.
    pub fn prepare_function(&self, name: &str) -> FunctionInvoker {
        FunctionInvoker::new(Arc::clone(&self.transport), Some(self.config.clone()), name)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
