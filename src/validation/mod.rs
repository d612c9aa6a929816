//! Task batch validation
//! Best-effort sanitization of caller-supplied task records

pub mod validator;

pub use validator::validate_tasks;
