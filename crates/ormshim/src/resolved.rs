//! The resolved operation surface.

use ormshim_dispatch::{Patch, Version};

use crate::host::{Connection, Handle, HostError, HostResult, Instance, Library, Model, Options, Row};
use crate::ops::{
    Find, FindAll, InstancePrototype, IsModelInstance, ModelConstructor, ModelInit, Query,
    Truncate, UnderscoredIf, UppercaseFirst, Variant,
};
use crate::table::{self, describe};

/// One bound implementation per operation, for one host version.
///
/// The fields say which call form was chosen; the methods of the same name
/// make the call. Call shapes are identical for every host version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPatches {
    pub(crate) version: Version,
    pub underscored_if: Patch<UnderscoredIf>,
    pub uppercase_first: UppercaseFirst,
    pub query: Query,
    pub find: Find,
    pub find_all: FindAll,
    pub truncate: Truncate,
    pub model_constructor: ModelConstructor,
    pub is_model_instance: IsModelInstance,
    pub instance_prototype: InstancePrototype,
    pub model_init: ModelInit,
}

impl ResolvedPatches {
    /// Host version these bindings were resolved for.
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn underscored_if(&self, library: &dyn Library, value: &str, condition: bool) -> HostResult<String> {
        match self.underscored_if {
            Patch::Available(implementation) => implementation.call(library, value, condition),
            Patch::Absent => Err(HostError::Unavailable {
                operation: table::UNDERSCORED_IF,
            }),
        }
    }

    pub fn uppercase_first(&self, library: &dyn Library, value: &str) -> HostResult<String> {
        self.uppercase_first.call(library, value)
    }

    pub fn query(&self, connection: &dyn Connection, sql: &str, options: &Options) -> HostResult<Vec<Row>> {
        self.query.call(connection, sql, options)
    }

    pub fn find(&self, model: &dyn Model, options: &Options) -> HostResult<Option<Row>> {
        self.find.call(model, options)
    }

    pub fn find_all(&self, model: &dyn Model, options: &Options) -> HostResult<Vec<Row>> {
        self.find_all.call(model, options)
    }

    pub fn truncate(&self, model: &dyn Model, options: &Options) -> HostResult<u64> {
        self.truncate.call(model, options)
    }

    pub fn model_constructor(&self, library: &dyn Library) -> HostResult<Handle> {
        self.model_constructor.call(library)
    }

    pub fn is_model_instance(&self, item: &dyn Instance) -> bool {
        self.is_model_instance.call(item)
    }

    pub fn instance_prototype(&self, model: &dyn Model) -> HostResult<Handle> {
        self.instance_prototype.call(model)
    }

    pub fn model_init(&self, model: &dyn Model) -> HostResult<()> {
        self.model_init.call(model)
    }

    /// `(operation, bound call)` pairs in declaration order.
    pub fn bindings(&self) -> [(&'static str, &'static str); 10] {
        [
            (table::UNDERSCORED_IF, describe(&self.underscored_if)),
            (table::UPPERCASE_FIRST, self.uppercase_first.describe()),
            (table::QUERY, self.query.describe()),
            (table::FIND, self.find.describe()),
            (table::FIND_ALL, self.find_all.describe()),
            (table::TRUNCATE, self.truncate.describe()),
            (table::MODEL_CONSTRUCTOR, self.model_constructor.describe()),
            (table::IS_MODEL_INSTANCE, self.is_model_instance.describe()),
            (table::INSTANCE_PROTOTYPE, self.instance_prototype.describe()),
            (table::MODEL_INIT, self.model_init.describe()),
        ]
    }
}
