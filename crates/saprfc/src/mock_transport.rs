//! Mock transport for testing.
//!
//! Scripted functions, recorded events. Used internally by the test suite
//! and not part of the public API.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::anyhow;
use anyhow::bail;
use indexmap::IndexMap;
use rfcapi::FieldSpec;
use rfcapi::Fields;

use crate::transport::Callable;
use crate::transport::Connection;
use crate::transport::ConnectionParams;
use crate::transport::Transport;

/// What a scripted function reports and returns.
#[derive(Clone)]
pub struct MockFunction {
    pub fields: IndexMap<String, FieldSpec>,
    pub reply: Result<Fields, String>,
    pub describe_error: Option<String>,
}

#[derive(Default)]
pub struct MockLog {
    pub expected_params: Option<ConnectionParams>,
    pub open_error: Option<String>,
    pub ping_error: Option<String>,
    pub functions: HashMap<String, MockFunction>,
    pub opened: usize,
    pub closed: usize,
    pub calls: Vec<(String, Fields)>,
    /// Lifecycle events in order: `open`, `lookup NAME`, `release NAME`, `close`.
    pub events: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    log: Arc<Mutex<MockLog>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    pub fn log(&self) -> MutexGuard<'_, MockLog> {
        self.log.lock().unwrap()
    }

    /// Registers a function described by `(name, type, direction, optional)` tuples.
    pub fn with_function(self, name: &str, fields: &[(&str, &str, &str, bool)], reply: Fields) -> Self {
        self.register(name, fields, Ok(reply))
    }

    /// Registers a function whose invocation always fails.
    pub fn with_failing_function(self, name: &str, fields: &[(&str, &str, &str, bool)], message: &str) -> Self {
        self.register(name, fields, Err(message.to_string()))
    }

    pub fn with_describe_error(self, name: &str, message: &str) -> Self {
        let function = MockFunction {
            fields: IndexMap::new(),
            reply: Ok(Fields::new()),
            describe_error: Some(message.to_string()),
        };
        self.log().functions.insert(name.to_string(), function);
        self
    }

    pub fn expect_params(self, params: ConnectionParams) -> Self {
        self.log().expected_params = Some(params);
        self
    }

    pub fn fail_open(&self, message: Option<&str>) {
        self.log().open_error = message.map(str::to_string);
    }

    pub fn fail_ping(&self, message: Option<&str>) {
        self.log().ping_error = message.map(str::to_string);
    }

    pub fn events(&self) -> Vec<String> {
        self.log().events.clone()
    }

    fn register(self, name: &str, fields: &[(&str, &str, &str, bool)], reply: Result<Fields, String>) -> Self {
        let mut described: IndexMap<String, FieldSpec> = fields
            .iter()
            .map(|(field, ty, dir, optional)| (field.to_string(), FieldSpec::new(ty, dir, *optional)))
            .collect();
        // the vendor module reports the function's own name as a field, too
        described.insert("name".to_string(), FieldSpec::default());

        let function = MockFunction { fields: described, reply, describe_error: None };
        self.log().functions.insert(name.to_string(), function);
        self
    }
}

impl Transport for MockTransport {
    fn open(&self, params: &ConnectionParams) -> anyhow::Result<Box<dyn Connection>> {
        let mut log = self.log();
        if let Some(message) = &log.open_error {
            bail!("{}", message);
        }
        if let Some(expected) = &log.expected_params {
            if expected != params {
                bail!("mock received invalid config array!");
            }
        }
        log.opened += 1;
        log.events.push("open".into());
        Ok(Box::new(MockConnection { log: Arc::clone(&self.log), open: true }))
    }
}

struct MockConnection {
    log: Arc<Mutex<MockLog>>,
    open: bool,
}

impl Connection for MockConnection {
    fn ping(&mut self) -> anyhow::Result<bool> {
        if !self.open {
            bail!("mock connection not open!");
        }
        match &self.log.lock().unwrap().ping_error {
            Some(message) => Err(anyhow!("{}", message)),
            None => Ok(true),
        }
    }

    fn close(&mut self) {
        // the vendor module fails on a second close; callers must not do that
        assert!(self.open, "mock connection already closed!");
        self.open = false;
        let mut log = self.log.lock().unwrap();
        log.closed += 1;
        log.events.push("close".into());
    }

    fn lookup(&mut self, name: &str) -> anyhow::Result<Box<dyn Callable>> {
        if !self.open {
            bail!("mock connection not open!");
        }
        let mut log = self.log.lock().unwrap();
        let function = log
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("function {} not found", name))?;
        log.events.push(format!("lookup {}", name));
        Ok(Box::new(MockCallable { name: name.to_string(), function, log: Arc::clone(&self.log) }))
    }
}

struct MockCallable {
    name: String,
    function: MockFunction,
    log: Arc<Mutex<MockLog>>,
}

impl Callable for MockCallable {
    fn describe(&self) -> anyhow::Result<IndexMap<String, FieldSpec>> {
        match &self.function.describe_error {
            Some(message) => Err(anyhow!("{}", message)),
            None => Ok(self.function.fields.clone()),
        }
    }

    fn invoke(&mut self, params: &Fields) -> anyhow::Result<Fields> {
        self.log.lock().unwrap().calls.push((self.name.clone(), params.clone()));
        self.function.reply.clone().map_err(|message| anyhow!("{}", message))
    }
}

impl Drop for MockCallable {
    fn drop(&mut self) {
        if let Ok(mut log) = self.log.lock() {
            log.events.push(format!("release {}", self.name));
        }
    }
}
