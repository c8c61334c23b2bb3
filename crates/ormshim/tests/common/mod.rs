#![allow(dead_code)]

use std::cell::RefCell;

use ormshim::host::{
    CallOptions, Connection, Dialect, Handle, HostClass, HostResult, Instance, Library, Model,
    Options, Row, Utils,
};

pub struct FakeUtils;

impl Utils for FakeUtils {
    fn underscored_if(&self, value: &str, condition: bool) -> String {
        if !condition {
            return value.to_string();
        }
        let mut out = String::new();
        for (i, c) in value.chars().enumerate() {
            if c.is_uppercase() {
                if i > 0 {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    fn uppercase_first(&self, value: &str) -> HostResult<String> {
        Ok(format!("host:{}", value))
    }
}

pub struct FakeLibrary {
    pub version: Option<String>,
    pub nested: bool,
    utils: FakeUtils,
}

impl FakeLibrary {
    pub fn new(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            nested: false,
            utils: FakeUtils,
        }
    }

    pub fn unreported() -> Self {
        Self {
            version: None,
            nested: false,
            utils: FakeUtils,
        }
    }

    pub fn with_nested_utils(mut self) -> Self {
        self.nested = true;
        self
    }
}

impl Library for FakeLibrary {
    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    fn utils(&self) -> &dyn Utils {
        &self.utils
    }

    fn nested_utils(&self) -> Option<&dyn Utils> {
        if self.nested { Some(&self.utils) } else { None }
    }

    fn model_class(&self) -> Handle {
        Handle(1)
    }

    fn model_prototype(&self) -> HostResult<Handle> {
        Ok(Handle(2))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(String),
    QueryWithCallee(String, Option<Handle>),
    FindOne(Options),
    Find(Options),
    FindWith(Options, CallOptions),
    FindAll(Options),
    FindAllWith(Options, CallOptions),
    Destroy(Options),
    Init,
}

pub struct FakeConnection {
    pub dialect: Dialect,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeConnection {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Connection for FakeConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn query(&self, sql: &str, _options: &Options) -> HostResult<Vec<Row>> {
        self.calls.borrow_mut().push(Call::Query(sql.to_string()));
        Ok(Vec::new())
    }

    fn query_with_callee(
        &self,
        sql: &str,
        callee: Option<Handle>,
        _options: &Options,
    ) -> HostResult<Vec<Row>> {
        self.calls
            .borrow_mut()
            .push(Call::QueryWithCallee(sql.to_string(), callee));
        Ok(Vec::new())
    }
}

pub struct FakeModel {
    pub schema: Option<String>,
    pub connection: FakeConnection,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeModel {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            schema: None,
            connection: FakeConnection::new(dialect),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn in_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Model for FakeModel {
    fn name(&self) -> &str {
        "folder"
    }

    fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    fn connection(&self) -> &dyn Connection {
        &self.connection
    }

    fn destroy(&self, options: &Options) -> HostResult<u64> {
        self.record(Call::Destroy(options.clone()));
        Ok(3)
    }

    fn find_one(&self, options: &Options) -> HostResult<Option<Row>> {
        self.record(Call::FindOne(options.clone()));
        Ok(None)
    }

    fn find(&self, options: &Options) -> HostResult<Option<Row>> {
        self.record(Call::Find(options.clone()));
        Ok(None)
    }

    fn find_with(&self, options: &Options, call: &CallOptions) -> HostResult<Option<Row>> {
        self.record(Call::FindWith(options.clone(), call.clone()));
        Ok(None)
    }

    fn find_all(&self, options: &Options) -> HostResult<Vec<Row>> {
        self.record(Call::FindAll(options.clone()));
        Ok(Vec::new())
    }

    fn find_all_with(&self, options: &Options, call: &CallOptions) -> HostResult<Vec<Row>> {
        self.record(Call::FindAllWith(options.clone(), call.clone()));
        Ok(Vec::new())
    }

    fn init(&self) -> HostResult<()> {
        self.record(Call::Init);
        Ok(())
    }

    fn prototype(&self) -> HostResult<Handle> {
        Ok(Handle(10))
    }

    fn instance_prototype(&self) -> HostResult<Handle> {
        Ok(Handle(11))
    }
}

/// A row object that extends exactly one host class.
pub struct FakeInstance(pub HostClass);

impl Instance for FakeInstance {
    fn is_instance_of(&self, class: HostClass) -> bool {
        self.0 == class
    }
}
