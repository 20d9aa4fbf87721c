mod entry;
pub mod todo;

pub use entry::{app, router};
