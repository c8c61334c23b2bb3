//! Class hierarchy differences.
//!
//! In 2.x and 3.x models are instances of `Model`, their rows are instances of
//! `model.Instance`, a subclass of `Instance`. From 4.x on models are
//! subclasses of `Model`, rows are instances of their model, and `Instance` is
//! gone.

use crate::host::{Handle, HostClass, HostResult, Instance, Library, Model};

use super::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelConstructor {
    /// `Model`
    Class,
    /// `Model.prototype`
    Prototype,
}

impl ModelConstructor {
    /// The host object model methods are patched onto.
    pub fn call(self, library: &dyn Library) -> HostResult<Handle> {
        match self {
            ModelConstructor::Class => Ok(library.model_class()),
            ModelConstructor::Prototype => library.model_prototype(),
        }
    }
}

impl Variant for ModelConstructor {
    fn describe(&self) -> &'static str {
        match self {
            ModelConstructor::Class => "Model",
            ModelConstructor::Prototype => "Model.prototype",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsModelInstance {
    InstanceOfModel,
    InstanceOfInstance,
}

impl IsModelInstance {
    pub fn call(self, item: &dyn Instance) -> bool {
        match self {
            IsModelInstance::InstanceOfModel => item.is_instance_of(HostClass::Model),
            IsModelInstance::InstanceOfInstance => item.is_instance_of(HostClass::Instance),
        }
    }
}

impl Variant for IsModelInstance {
    fn describe(&self) -> &'static str {
        match self {
            IsModelInstance::InstanceOfModel => "instanceof Model",
            IsModelInstance::InstanceOfInstance => "instanceof Instance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstancePrototype {
    ModelPrototype,
    InstanceClassPrototype,
}

impl InstancePrototype {
    pub fn call(self, model: &dyn Model) -> HostResult<Handle> {
        match self {
            InstancePrototype::ModelPrototype => model.prototype(),
            InstancePrototype::InstanceClassPrototype => model.instance_prototype(),
        }
    }
}

impl Variant for InstancePrototype {
    fn describe(&self) -> &'static str {
        match self {
            InstancePrototype::ModelPrototype => "model.prototype",
            InstancePrototype::InstanceClassPrototype => "model.Instance.prototype",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelInit {
    Noop,
    Init,
}

impl ModelInit {
    pub fn call(self, model: &dyn Model) -> HostResult<()> {
        match self {
            ModelInit::Noop => Ok(()),
            ModelInit::Init => model.init(),
        }
    }
}

impl Variant for ModelInit {
    fn describe(&self) -> &'static str {
        match self {
            ModelInit::Noop => "no-op",
            ModelInit::Init => "model.init(modelManager)",
        }
    }
}
