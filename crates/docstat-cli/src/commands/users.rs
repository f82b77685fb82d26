//! User administration commands.

use crate::app::App;
use clap::Subcommand;
use docstat_api::UserRecord;

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all users
    List,
    /// Show one user
    Get { id: i64 },
}

pub async fn run(app: &App, cmd: UsersCommand) -> Result<(), Box<dyn std::error::Error>> {
    app.require(true)?;

    match cmd {
        UsersCommand::List => {
            for user in app.users().list().await? {
                print_row(&user);
            }
        }
        UsersCommand::Get { id } => {
            let user = app.users().get(id).await?;
            print_row(&user);
            if let Some(created_at) = &user.created_at {
                println!("        created {}", created_at);
            }
            if let Some(updated_at) = &user.updated_at {
                println!("        updated {}", updated_at);
            }
        }
    }

    Ok(())
}

fn print_row(user: &UserRecord) {
    println!(
        "{:>6}  {:<6}  {:<8}  {} <{}>",
        user.id,
        if user.is_admin() { "admin" } else { "user" },
        if user.is_active() { "active" } else { "disabled" },
        user.full_name(),
        user.email
    );
}
