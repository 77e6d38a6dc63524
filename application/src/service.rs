mod catalog;
mod lending;
mod registry;
mod search;

pub use self::{catalog::*, lending::*, registry::*, search::*};

#[cfg(test)]
pub(crate) mod test_support;
