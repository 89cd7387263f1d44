//! Client-side connection and transaction layer for the gallery.
//!
//! Wraps the RPC stack behind an explicitly constructed connection context and
//! a single transaction-submission path with log-based failure classification.

pub mod connection;
pub mod error;
pub mod logs;
pub mod notify;
pub mod program_errors;
pub mod settings;
pub mod tokens;
pub mod transactions;
pub mod wallet;

pub use connection::ConnectionContext;
pub use error::SendTransactionError;
