pub mod link;
pub mod matrix;
pub mod thread;
