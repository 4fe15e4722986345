//! SQLite persistence module
//!
//! Repository pattern for SQLite database access, plus the immediate
//! write-transaction guard used by the transfer engine.

pub mod repos;
pub mod schema;
pub mod tx;

pub use repos::{
    create_pool, create_schema, init_database, AccountRepo, CredentialRepo, LedgerRepo,
    BUSY_TIMEOUT,
};
pub use schema::{AccountRow, CredentialRow, LedgerEntryRow};
pub use tx::ImmediateTx;
