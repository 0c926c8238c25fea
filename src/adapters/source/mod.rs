pub mod builtin;
pub mod file;
pub mod http;
