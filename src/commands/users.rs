//! Users command - Account administration.

use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::Config;
use crate::domain::StoreError;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, UserRepository, UserStore};

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;
    let users = UserStore::new(db.get_connection());

    match args.action {
        UsersAction::SetRole { username, role } => {
            let identity = users.update_role(&username, role).await.map_err(|e| match e {
                StoreError::NotFound => AppError::validation(format!("No such user: {}", username)),
                other => other.into(),
            })?;

            tracing::info!(username = %identity.username, role = %identity.role, "Role updated");
            println!("{}: {}", identity.username, identity.role);
        }
    }

    Ok(())
}
