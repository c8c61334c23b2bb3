//! The declared compatibility table.
//!
//! Ranges are listed newest first. Where a newest range carries
//! `|| >=5.0.0-beta`, the 5.0.0 prerelease stream is served like the final
//! 5.x releases; plain ranges never match prereleases.

use ormshim_dispatch::{
    Error, OperationSpec, Patch, RangeMatcher, Resolve, Result, Version, VersionRange, boundaries,
    resolve_operation,
};

use crate::host::Library;
use crate::ops::{
    Find, FindAll, InstancePrototype, IsModelInstance, ModelConstructor, ModelInit, Query,
    Truncate, UnderscoredIf, UppercaseFirst, Variant,
};
use crate::resolved::ResolvedPatches;

pub const UNDERSCORED_IF: &str = "underscoredIf";
pub const UPPERCASE_FIRST: &str = "uppercaseFirst";
pub const QUERY: &str = "query";
pub const FIND: &str = "find";
pub const FIND_ALL: &str = "findAll";
pub const TRUNCATE: &str = "truncate";
pub const MODEL_CONSTRUCTOR: &str = "modelConstructor";
pub const IS_MODEL_INSTANCE: &str = "isModelInstance";
pub const INSTANCE_PROTOTYPE: &str = "instancePrototype";
pub const MODEL_INIT: &str = "modelInit";

/// Every operation name, in declaration order.
pub const OPERATIONS: [&str; 10] = [
    UNDERSCORED_IF,
    UPPERCASE_FIRST,
    QUERY,
    FIND,
    FIND_ALL,
    TRUNCATE,
    MODEL_CONSTRUCTOR,
    IS_MODEL_INSTANCE,
    INSTANCE_PROTOTYPE,
    MODEL_INIT,
];

const V2: &str = "^2.0.0";
const V2_TO_V3: &str = "2.0.0 - 3.x.x";
const V3_TO_V4: &str = "3.0.0 - 4.x.x";
const V3_UP: &str = ">=3.0.0 || >=5.0.0-beta";
const V4_UP: &str = ">=4.0.0 || >=5.0.0-beta";
const V5_UP: &str = ">=5.0.0 || >=5.0.0-beta";
const V5_RELEASE: &str = ">=5.0.0";
const ANY: &str = "*";

/// Host capabilities that change what the table declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Features {
    /// The host carries the `Utils._` namespace.
    pub nested_utils: bool,
}

impl Features {
    pub fn of(library: &dyn Library) -> Self {
        Self {
            nested_utils: library.nested_utils().is_some(),
        }
    }
}

/// One typed [`OperationSpec`] per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct SequelizeTable {
    pub underscored_if: OperationSpec<UnderscoredIf>,
    pub uppercase_first: OperationSpec<UppercaseFirst>,
    pub query: OperationSpec<Query>,
    pub find: OperationSpec<Find>,
    pub find_all: OperationSpec<FindAll>,
    pub truncate: OperationSpec<Truncate>,
    pub model_constructor: OperationSpec<ModelConstructor>,
    pub is_model_instance: OperationSpec<IsModelInstance>,
    pub instance_prototype: OperationSpec<InstancePrototype>,
    pub model_init: OperationSpec<ModelInit>,
}

impl SequelizeTable {
    pub fn declare(features: Features) -> Result<Self> {
        use Patch::Available;

        let nested_utils = Patch::from(
            features
                .nested_utils
                .then_some(UnderscoredIf::NestedUtils),
        );

        Ok(Self {
            underscored_if: OperationSpec::declare(
                UNDERSCORED_IF,
                [(V3_UP, Available(UnderscoredIf::Utils)), (V2, nested_utils)],
            )?,
            uppercase_first: OperationSpec::declare(
                UPPERCASE_FIRST,
                [
                    (V5_RELEASE, Available(UppercaseFirst::Local)),
                    (ANY, Available(UppercaseFirst::Host)),
                ],
            )?,
            query: OperationSpec::declare(
                QUERY,
                [
                    (V3_UP, Available(Query::Direct)),
                    (V2, Available(Query::WithPlaceholder)),
                ],
            )?,
            find: OperationSpec::declare(
                FIND,
                [
                    (V5_UP, Available(Find::FindOne)),
                    (V3_TO_V4, Available(Find::Alias)),
                    (V2, Available(Find::AliasWithCallOptions)),
                ],
            )?,
            find_all: OperationSpec::declare(
                FIND_ALL,
                [
                    (V3_UP, Available(FindAll::Direct)),
                    (V2, Available(FindAll::WithCallOptions)),
                ],
            )?,
            truncate: OperationSpec::declare(
                TRUNCATE,
                [
                    (V3_UP, Available(Truncate::Flag)),
                    (V2, Available(Truncate::SchemaWorkaround)),
                ],
            )?,
            model_constructor: OperationSpec::declare(
                MODEL_CONSTRUCTOR,
                [
                    (V4_UP, Available(ModelConstructor::Class)),
                    (V2_TO_V3, Available(ModelConstructor::Prototype)),
                ],
            )?,
            is_model_instance: OperationSpec::declare(
                IS_MODEL_INSTANCE,
                [
                    (V4_UP, Available(IsModelInstance::InstanceOfModel)),
                    (V2_TO_V3, Available(IsModelInstance::InstanceOfInstance)),
                ],
            )?,
            instance_prototype: OperationSpec::declare(
                INSTANCE_PROTOTYPE,
                [
                    (V4_UP, Available(InstancePrototype::ModelPrototype)),
                    (V2_TO_V3, Available(InstancePrototype::InstanceClassPrototype)),
                ],
            )?,
            model_init: OperationSpec::declare(
                MODEL_INIT,
                [
                    (V4_UP, Available(ModelInit::Noop)),
                    (V2_TO_V3, Available(ModelInit::Init)),
                ],
            )?,
        })
    }

    /// The table as declared for `library`'s capabilities.
    pub fn for_library(library: &dyn Library) -> Result<Self> {
        Self::declare(Features::of(library))
    }

    /// Type-erased views of every operation, in declaration order.
    pub fn operations(&self) -> [&dyn Operation; 10] {
        [
            &self.underscored_if,
            &self.uppercase_first,
            &self.query,
            &self.find,
            &self.find_all,
            &self.truncate,
            &self.model_constructor,
            &self.is_model_instance,
            &self.instance_prototype,
            &self.model_init,
        ]
    }

    /// Every version named by any range of the table, sorted.
    pub fn boundaries(&self) -> Vec<Version> {
        let mut out: Vec<Version> = self
            .operations()
            .iter()
            .flat_map(|op| op.boundaries())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Names of the operations with no matching entry for `version`.
    pub fn unmatched(&self, version: &Version, matcher: &dyn RangeMatcher) -> Vec<&'static str> {
        self.operations()
            .iter()
            .zip(OPERATIONS)
            .filter(|(op, _)| op.binding(version, matcher).is_none())
            .map(|(_, name)| name)
            .collect()
    }
}

impl Resolve for SequelizeTable {
    type Output = ResolvedPatches;

    fn resolve(&self, version: &Version, matcher: &dyn RangeMatcher) -> Result<ResolvedPatches> {
        Ok(ResolvedPatches {
            version: version.clone(),
            underscored_if: *resolve_operation(&self.underscored_if, version, matcher)?.patch(),
            uppercase_first: required(&self.uppercase_first, version, matcher)?,
            query: required(&self.query, version, matcher)?,
            find: required(&self.find, version, matcher)?,
            find_all: required(&self.find_all, version, matcher)?,
            truncate: required(&self.truncate, version, matcher)?,
            model_constructor: required(&self.model_constructor, version, matcher)?,
            is_model_instance: required(&self.is_model_instance, version, matcher)?,
            instance_prototype: required(&self.instance_prototype, version, matcher)?,
            model_init: required(&self.model_init, version, matcher)?,
        })
    }
}

fn required<T: Copy>(spec: &OperationSpec<T>, version: &Version, matcher: &dyn RangeMatcher) -> Result<T> {
    match resolve_operation(spec, version, matcher)?.patch() {
        Patch::Available(implementation) => Ok(*implementation),
        Patch::Absent => Err(Error::NoMatchingRange {
            operation: spec.name().to_string(),
            version: version.clone(),
        }),
    }
}

/// Read-only view of one declared operation, independent of its
/// implementation type.
pub trait Operation {
    fn name(&self) -> &str;

    /// `(range, bound call)` per entry, in declaration order.
    fn entries(&self) -> Vec<(&VersionRange, &'static str)>;

    /// The entry `version` would bind, if any.
    fn binding(&self, version: &Version, matcher: &dyn RangeMatcher) -> Option<(&VersionRange, &'static str)>;

    fn boundaries(&self) -> Vec<Version>;
}

impl<T: Variant> Operation for OperationSpec<T> {
    fn name(&self) -> &str {
        OperationSpec::name(self)
    }

    fn entries(&self) -> Vec<(&VersionRange, &'static str)> {
        OperationSpec::entries(self)
            .iter()
            .map(|entry| (entry.range(), describe(entry.patch())))
            .collect()
    }

    fn binding(&self, version: &Version, matcher: &dyn RangeMatcher) -> Option<(&VersionRange, &'static str)> {
        self.select(version, matcher)
            .map(|entry| (entry.range(), describe(entry.patch())))
    }

    fn boundaries(&self) -> Vec<Version> {
        boundaries(OperationSpec::entries(self))
    }
}

pub(crate) fn describe<T: Variant>(patch: &Patch<T>) -> &'static str {
    match patch {
        Patch::Available(implementation) => implementation.describe(),
        Patch::Absent => "absent",
    }
}
