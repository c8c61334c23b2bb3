use crate::host::{CallOptions, Connection, Dialect, Filter, HostResult, Model, Options, Row};

use super::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// `query(sql, options)`
    Direct,
    /// `query(sql, null, options)`
    WithPlaceholder,
}

impl Query {
    pub fn call(self, connection: &dyn Connection, sql: &str, options: &Options) -> HostResult<Vec<Row>> {
        match self {
            Query::Direct => connection.query(sql, options),
            Query::WithPlaceholder => connection.query_with_callee(sql, None, options),
        }
    }
}

impl Variant for Query {
    fn describe(&self) -> &'static str {
        match self {
            Query::Direct => "query(sql, options)",
            Query::WithPlaceholder => "query(sql, null, options)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Find {
    /// `findOne(options)`; the `find` alias is gone in 5.x.
    FindOne,
    /// `find(options)`
    Alias,
    /// `find(options, {transaction, logging})`
    AliasWithCallOptions,
}

impl Find {
    /// One row, or `None` when nothing matches.
    pub fn call(self, model: &dyn Model, options: &Options) -> HostResult<Option<Row>> {
        match self {
            Find::FindOne => model.find_one(options),
            Find::Alias => model.find(options),
            Find::AliasWithCallOptions => model.find_with(options, &CallOptions::from(options)),
        }
    }
}

impl Variant for Find {
    fn describe(&self) -> &'static str {
        match self {
            Find::FindOne => "findOne(options)",
            Find::Alias => "find(options)",
            Find::AliasWithCallOptions => "find(options, {transaction, logging})",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindAll {
    /// `findAll(options)`
    Direct,
    /// `findAll(options, {transaction, logging})`
    WithCallOptions,
}

impl FindAll {
    pub fn call(self, model: &dyn Model, options: &Options) -> HostResult<Vec<Row>> {
        match self {
            FindAll::Direct => model.find_all(options),
            FindAll::WithCallOptions => {
                model.find_all_with(options, &CallOptions::from(options))
            }
        }
    }
}

impl Variant for FindAll {
    fn describe(&self) -> &'static str {
        match self {
            FindAll::Direct => "findAll(options)",
            FindAll::WithCallOptions => "findAll(options, {transaction, logging})",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truncate {
    /// `destroy` with `truncate: true`.
    Flag,
    /// 2.x breaks `truncate` on schema-qualified postgres models; those get an
    /// empty filter instead.
    SchemaWorkaround,
}

impl Truncate {
    /// Number of rows removed, as reported by the host.
    pub fn call(self, model: &dyn Model, options: &Options) -> HostResult<u64> {
        let mut options = options.clone();
        match self {
            Truncate::Flag => options.truncate = true,
            Truncate::SchemaWorkaround => {
                if model.connection().dialect() == Dialect::Postgres && model.schema().is_some() {
                    options.filter = Some(Filter::new());
                } else {
                    options.truncate = true;
                }
            }
        }
        model.destroy(&options)
    }
}

impl Variant for Truncate {
    fn describe(&self) -> &'static str {
        match self {
            Truncate::Flag => "destroy({truncate: true})",
            Truncate::SchemaWorkaround => "destroy with schema workaround",
        }
    }
}
