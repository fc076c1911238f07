use clap::Parser;
use dispatch_audit_types::AuditActor;
use dispatch_server::{domain::CreateUserRequest, services::UserService};
use sqlx::SqlitePool;

use crate::error::CliError;
use crate::output::{print_user, print_user_list};

/// Create a user account
#[derive(Debug, Parser)]
pub struct AddUserCommand {
    /// Full name of the user
    pub name: String,

    /// Email address (must be unique)
    pub email: String,

    /// User role (admin, manager, worker)
    pub role: String,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Create the user as inactive
    #[arg(long)]
    pub inactive: bool,

    /// Password for login
    #[arg(long, env = "DISPATCH_USER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl AddUserCommand {
    pub async fn execute(&self, pool: &SqlitePool) -> Result<(), CliError> {
        let request = CreateUserRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role.clone(),
            is_active: !self.inactive,
            password: self.password.clone(),
        };

        let user = UserService::new(pool.clone())
            .create(&AuditActor::system("cli"), request)
            .await?;

        println!("User created successfully!");
        print_user(&user.view());
        Ok(())
    }
}

/// Print every user account
#[derive(Debug, Parser)]
pub struct DumpUsersCommand {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl DumpUsersCommand {
    pub async fn execute(&self, pool: &SqlitePool) -> Result<(), CliError> {
        let users: Vec<_> = UserService::new(pool.clone())
            .list()
            .await?
            .iter()
            .map(|u| u.view())
            .collect();

        if self.json {
            let text = serde_json::to_string_pretty(&users).map_err(anyhow::Error::from)?;
            println!("{text}");
        } else {
            print_user_list(&users);
        }
        Ok(())
    }
}
