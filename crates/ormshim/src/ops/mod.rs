//! Implementation variants, one enum per operation.
//!
//! Each variant stands for one host call form. Binding an operation means
//! picking a variant, so a resolved operation is `Copy`, comparable, and its
//! call shape is fixed by the enum's `call` method regardless of the variant.

pub use model::{InstancePrototype, IsModelInstance, ModelConstructor, ModelInit};
pub use query::{Find, FindAll, Query, Truncate};
pub use utils::{UnderscoredIf, UppercaseFirst};

mod model;
mod query;
mod utils;

/// Short, stable label of the host call a variant makes.
pub trait Variant: Copy {
    fn describe(&self) -> &'static str;
}
