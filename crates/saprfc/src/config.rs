//! # Connection Configuration
//!
//! Two connection profiles are supported:
//!
//! - **Type A** connects to one specific application server.
//! - **Type B** connects through a message server with load balancing.
//!
//! Both turn into the flat [`ConnectionParams`] mapping the transport opens a
//! session with. Missing mandatory keys are only detected when that mapping
//! is generated, which happens right before a connection is opened.

use std::path::Path;

use serde::Deserialize;
use serde::Deserializer;

use crate::error::Error;
use crate::error::Result;
use crate::transport::ConnectionParams;

/// Direct application server profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigA {
    #[serde(deserialize_with = "scalar")]
    pub ashost: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub sysnr: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub client: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub user: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub passwd: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub gwhost: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub gwserv: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub lang: Option<String>,
    #[serde(deserialize_with = "trace_level")]
    pub trace: Option<u8>,
}

/// Load balancing profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigB {
    #[serde(deserialize_with = "scalar")]
    pub client: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub user: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub passwd: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub mshost: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub r3name: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub group: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub lang: Option<String>,
    #[serde(deserialize_with = "trace_level")]
    pub trace: Option<u8>,
}

macro_rules! setters {
    ($ty:ident { $($field:ident),* }) => {
        impl $ty {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(mut self, value: impl Into<String>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            /// Sets the trace level; any level above zero enables tracing.
            pub fn trace(mut self, level: u8) -> Self {
                self.trace = Some(level);
                self
            }
        }
    };
}

setters!(ConfigA { ashost, sysnr, client, user, passwd, gwhost, gwserv, lang });
setters!(ConfigB { client, user, passwd, mshost, r3name, group, lang });

impl ConfigA {
    pub fn connection_params(&self) -> Result<ConnectionParams> {
        let mut params = ConnectionParams::new();
        put(&mut params, "ASHOST", &self.ashost, true)?;
        put(&mut params, "SYSNR", &self.sysnr, true)?;
        put(&mut params, "CLIENT", &self.client, true)?;
        put(&mut params, "USER", &self.user, true)?;
        put(&mut params, "PASSWD", &self.passwd, true)?;
        put(&mut params, "GWHOST", &self.gwhost, false)?;
        put(&mut params, "GWSERV", &self.gwserv, false)?;
        put(&mut params, "LANG", &self.lang, false)?;
        put_trace(&mut params, self.trace);
        Ok(params)
    }
}

impl ConfigB {
    pub fn connection_params(&self) -> Result<ConnectionParams> {
        let mut params = ConnectionParams::new();
        put(&mut params, "CLIENT", &self.client, true)?;
        put(&mut params, "USER", &self.user, true)?;
        put(&mut params, "PASSWD", &self.passwd, true)?;
        put(&mut params, "MSHOST", &self.mshost, true)?;
        put(&mut params, "R3NAME", &self.r3name, true)?;
        put(&mut params, "GROUP", &self.group, true)?;
        put(&mut params, "LANG", &self.lang, false)?;
        put_trace(&mut params, self.trace);
        Ok(params)
    }
}

fn put(params: &mut ConnectionParams, key: &str, value: &Option<String>, mandatory: bool) -> Result<()> {
    match value {
        Some(value) => {
            params.insert(key.to_string(), value.clone());
        }
        None if mandatory => {
            return Err(Error::IncompleteConfig(format!(
                "missing mandatory key {}",
                key.to_lowercase()
            )));
        }
        None => {}
    }
    Ok(())
}

fn put_trace(params: &mut ConnectionParams, trace: Option<u8>) {
    if let Some(level) = trace {
        let enabled = if level > 0 { "1" } else { "0" };
        params.insert("TRACE".to_string(), enabled.to_string());
    }
}

/// A connection profile of either type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Config {
    A(ConfigA),
    B(ConfigB),
}

impl Config {
    /// Parses a flat JSON object with lower-case keys.
    ///
    /// The profile type is inferred: `ashost` selects type A, `mshost` type B.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::IncompleteConfig(format!("invalid JSON: {}", e)))?;
        let Some(object) = value.as_object() else {
            return Err(Error::IncompleteConfig("configuration must be a JSON object".into()));
        };

        let config = if object.contains_key("ashost") {
            serde_json::from_value(value).map(Config::A)
        } else if object.contains_key("mshost") {
            serde_json::from_value(value).map(Config::B)
        } else {
            return Err(Error::IncompleteConfig(
                "cannot determine connection type: neither ashost nor mshost given".into(),
            ));
        };
        config.map_err(|e| Error::IncompleteConfig(format!("invalid configuration: {}", e)))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::IncompleteConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// The mapping handed to [`Transport::open`](crate::transport::Transport::open).
    pub fn connection_params(&self) -> Result<ConnectionParams> {
        match self {
            Config::A(config) => config.connection_params(),
            Config::B(config) => config.connection_params(),
        }
    }
}

impl From<ConfigA> for Config {
    fn from(config: ConfigA) -> Self { Config::A(config) }
}

impl From<ConfigB> for Config {
    fn from(config: ConfigB) -> Self { Config::B(config) }
}

// Configuration files write numbers like `sysnr` and `client` either quoted
// or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn scalar<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(de)?.map(|raw| match raw {
        Scalar::Str(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

fn trace_level<'de, D: Deserializer<'de>>(de: D) -> std::result::Result<Option<u8>, D::Error> {
    use serde::de::Error as _;

    let Some(raw) = Option::<Scalar>::deserialize(de)? else {
        return Ok(None);
    };
    let level = match raw {
        Scalar::Int(i) => i,
        Scalar::Bool(b) => b as i64,
        Scalar::Str(s) => s.trim().parse::<i64>().map_err(D::Error::custom)?,
        Scalar::Float(f) => f as i64,
    };
    Ok(Some(level.clamp(0, u8::MAX as i64) as u8))
}
