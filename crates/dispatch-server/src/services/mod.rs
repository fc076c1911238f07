//! Application services. Handlers stay thin and call into these.

pub mod activity;
pub mod auth;
pub mod bootstrap;
pub mod jobs;
pub mod users;

pub use activity::ActivityService;
pub use auth::{AuthService, LoginResponse};
pub use bootstrap::{bootstrap, seed_demo_users, BootstrapReport, DEMO_USERS};
pub use jobs::{JobService, ScheduleSummary};
pub use users::UserService;
