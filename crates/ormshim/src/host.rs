//! The host library as seen by the shim.
//!
//! These traits are implemented by the embedding application on top of
//! whatever release of the ORM it has loaded. Every call form that existed in
//! some supported release has a method here; the ones a given release lacks
//! keep their default body, which reports [`HostError::Unsupported`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub type Row = serde_json::Map<String, Value>;
pub type Filter = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("host library does not provide {call}")]
    Unsupported { call: &'static str },

    #[error("host library has no '{0}' namespace")]
    MissingNamespace(&'static str),

    #[error("no implementation of '{operation}' for this host version")]
    Unavailable { operation: &'static str },
}

pub type HostResult<T> = std::result::Result<T, HostError>;

fn unsupported<T>(call: &'static str) -> HostResult<T> {
    Err(HostError::Unsupported { call })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Postgres,
    Mysql,
    Mariadb,
    Sqlite,
    Mssql,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction(pub String);

/// Opaque reference to an object living inside the host library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub u64);

/// Host classes an item can be tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostClass {
    Model,
    Instance,
}

/// Options accepted by lookups and `destroy`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    pub logging: bool,
    pub truncate: bool,
}

/// Second argument of the two-argument lookups of the 2.x line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    pub logging: bool,
}

impl From<&Options> for CallOptions {
    fn from(options: &Options) -> Self {
        Self {
            transaction: options.transaction.clone(),
            logging: options.logging,
        }
    }
}

pub trait Utils {
    fn underscored_if(&self, value: &str, condition: bool) -> String;

    fn uppercase_first(&self, _value: &str) -> HostResult<String> {
        unsupported("Utils.uppercaseFirst")
    }
}

pub trait Library {
    /// Version the loaded library reports about itself, if any.
    fn version(&self) -> Option<&str>;

    fn utils(&self) -> &dyn Utils;

    /// The `Utils._` namespace some 2.x builds carry.
    fn nested_utils(&self) -> Option<&dyn Utils> {
        None
    }

    fn model_class(&self) -> Handle;

    fn model_prototype(&self) -> HostResult<Handle> {
        unsupported("Model.prototype")
    }
}

pub trait Connection {
    fn dialect(&self) -> Dialect;

    fn query(&self, _sql: &str, _options: &Options) -> HostResult<Vec<Row>> {
        unsupported("query(sql, options)")
    }

    fn query_with_callee(
        &self,
        _sql: &str,
        _callee: Option<Handle>,
        _options: &Options,
    ) -> HostResult<Vec<Row>> {
        unsupported("query(sql, callee, options)")
    }
}

pub trait Model {
    fn name(&self) -> &str;

    fn schema(&self) -> Option<&str> {
        None
    }

    fn connection(&self) -> &dyn Connection;

    fn destroy(&self, options: &Options) -> HostResult<u64>;

    fn find_one(&self, _options: &Options) -> HostResult<Option<Row>> {
        unsupported("Model.findOne(options)")
    }

    fn find(&self, _options: &Options) -> HostResult<Option<Row>> {
        unsupported("Model.find(options)")
    }

    fn find_with(&self, _options: &Options, _call: &CallOptions) -> HostResult<Option<Row>> {
        unsupported("Model.find(options, queryOptions)")
    }

    fn find_all(&self, _options: &Options) -> HostResult<Vec<Row>> {
        unsupported("Model.findAll(options)")
    }

    fn find_all_with(&self, _options: &Options, _call: &CallOptions) -> HostResult<Vec<Row>> {
        unsupported("Model.findAll(options, queryOptions)")
    }

    /// `model.init(modelManager)`, required before use on 2.x and 3.x.
    fn init(&self) -> HostResult<()> {
        unsupported("Model.init(modelManager)")
    }

    fn prototype(&self) -> HostResult<Handle> {
        unsupported("model.prototype")
    }

    fn instance_prototype(&self) -> HostResult<Handle> {
        unsupported("model.Instance.prototype")
    }
}

pub trait Instance {
    fn is_instance_of(&self, class: HostClass) -> bool;
}
