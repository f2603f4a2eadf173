//! Infrastructure layer - database and persistence adapters.

mod db;
pub mod memory;
pub mod migrations;
pub mod unit_of_work;

pub use db::Database;
pub use memory::{MemoryPersistence, MemoryUserStore};
pub use migrations::Migrator;
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
