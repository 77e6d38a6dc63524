mod book;
mod lending;
mod patron;

pub use self::{book::*, lending::*, patron::*};
