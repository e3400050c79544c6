pub mod connection;

pub use connection::{establish_connection, run_migrations, test_connection};
