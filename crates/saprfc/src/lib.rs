//! # saprfc
//!
//! A typed client for remote ERP function modules.
//!
//! ## Architecture
//!
//! - **Transport**: the vendor RFC library behind three small traits
//!   (`Transport`, `Connection`, `Callable`). Everything it does is blocking.
//! - **Config**: type A (application server) and type B (load balancing)
//!   connection profiles, loadable from JSON.
//! - **FunctionInvoker**: lazily connects, resolves the function, caches its
//!   API description and turns parameters into results via [`rfcapi`].
//! - **Session**: a standalone connection for pings and preparing functions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use saprfc::{Config, ParameterBag, Session, Transport};
//!
//! # fn example(transport: Arc<dyn Transport>) -> saprfc::Result<()> {
//! let config = Config::from_file("sap.json")?;
//! let session = Session::new(transport, config);
//!
//! let mut read = session.prepare_function("RFC_READ_TABLE");
//! let rows = read.invoke(&ParameterBag::new().with("QUERY_TABLE", "USR01"))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod invoker;
pub mod session;
pub mod transport;

pub use config::Config;
pub use config::ConfigA;
pub use config::ConfigB;
pub use error::Error;
pub use error::Result;
pub use invoker::FunctionInvoker;
pub use invoker::Phase;
pub use rfcapi::ApiDescriptor;
pub use rfcapi::Fields;
pub use rfcapi::ParameterBag;
pub use rfcapi::Value;
pub use session::Session;
pub use transport::Callable;
pub use transport::Connection;
pub use transport::ConnectionParams;
pub use transport::Transport;

#[cfg(test)]
mod mock_transport;
