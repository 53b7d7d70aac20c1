//! Internal utilities shared by CLI commands.

mod connection;

pub use self::connection::ConnectionArgs;
