//! In-Memory Store Adapter
//!
//! Implements the `LedgerStore` and `TaxStore` ports over
//! `tokio::sync::RwLock` maps. Used by the test suites and by callers
//! embedding the ledger core without a database. The write lock
//! serializes concurrent writers, which is all the atomicity the
//! read-snapshot / compute / batch-append sequence requires.

pub mod store;

pub use store::InMemoryStore;
