mod book;
mod patron;

pub use self::{book::*, patron::*};
