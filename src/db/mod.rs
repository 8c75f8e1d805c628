//! Database access: async PostgreSQL pooling via diesel_async with bb8, and
//! the embedded migration runner.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, establish_async_connection_pool, get_connection, ping};
