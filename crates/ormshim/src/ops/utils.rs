use crate::host::{HostError, HostResult, Library};

use super::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderscoredIf {
    /// `Utils.underscoredIf`
    Utils,
    /// `Utils._.underscoredIf`, where 2.x kept it.
    NestedUtils,
}

impl UnderscoredIf {
    pub fn call(self, library: &dyn Library, value: &str, condition: bool) -> HostResult<String> {
        match self {
            UnderscoredIf::Utils => Ok(library.utils().underscored_if(value, condition)),
            UnderscoredIf::NestedUtils => library
                .nested_utils()
                .map(|utils| utils.underscored_if(value, condition))
                .ok_or(HostError::MissingNamespace("Utils._")),
        }
    }
}

impl Variant for UnderscoredIf {
    fn describe(&self) -> &'static str {
        match self {
            UnderscoredIf::Utils => "Utils.underscoredIf",
            UnderscoredIf::NestedUtils => "Utils._.underscoredIf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UppercaseFirst {
    /// Implemented here; the host dropped it in 5.x.
    Local,
    Host,
}

impl UppercaseFirst {
    pub fn call(self, library: &dyn Library, value: &str) -> HostResult<String> {
        match self {
            UppercaseFirst::Local => Ok(uppercase_first(value)),
            UppercaseFirst::Host => library.utils().uppercase_first(value),
        }
    }
}

impl Variant for UppercaseFirst {
    fn describe(&self) -> &'static str {
        match self {
            UppercaseFirst::Local => "local uppercaseFirst",
            UppercaseFirst::Host => "Utils.uppercaseFirst",
        }
    }
}

fn uppercase_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
