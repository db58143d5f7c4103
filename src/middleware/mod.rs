//! Request-scoped middleware: authorization guards and flash messages

pub mod auth;
pub mod flash;
