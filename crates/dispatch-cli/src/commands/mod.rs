//! Subcommand implementations.

mod migrate;
mod seed;
mod users;

pub use migrate::MigrateCommand;
pub use seed::SeedCommand;
pub use users::{AddUserCommand, DumpUsersCommand};
