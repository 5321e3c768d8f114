//! Gumroad API model types.

mod link;

pub(crate) use link::LinkParams;
pub use link::{Link, LinkFields};
