//! Domain types shared by repositories, services and handlers.

pub mod activity;
pub mod job;
pub mod user;

pub use activity::{ActivityLogEntry, LogFilter};
pub use job::{Job, JobDetail, RequiredExpertise, WorkerLevel};
pub use user::{CreateUserRequest, NewUser, Role, UpdateUserRequest, User, UserChanges, UserView};
