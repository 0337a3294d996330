use clap::Subcommand;
use serde_json::{json, Map};

use crate::auth::hash_password;
use crate::cli::utils::{connect, output_success, print_json};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::models::NewUser;
use crate::database::repository::UserRepository;
use crate::search::{like_pattern, normalize_query};
use crate::validation::{validate_email, validate_password, validate_username};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user account, including administrators")]
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long, help = "Service (department) the user belongs to")]
        service: Option<String>,

        #[arg(long, help = "Place the user in the administrator service", conflicts_with = "service")]
        admin: bool,
    },

    #[command(about = "List users")]
    List {
        #[arg(long, help = "Filter by username, email or service")]
        query: Option<String>,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Create {
            username,
            email,
            password,
            service,
            admin,
        } => {
            let service = match (admin, service) {
                (true, _) => config::config().desk.admin_service.clone(),
                (false, Some(service)) if !service.trim().is_empty() => service.trim().to_string(),
                (false, _) => anyhow::bail!("Either --service or --admin is required"),
            };

            let problems: Vec<String> = [
                validate_username(&username),
                validate_email(&email),
                validate_password(&password),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !problems.is_empty() {
                anyhow::bail!(problems.join("; "));
            }

            let users = UserRepository::new(connect().await?);
            if users.exists(&username, &email).await? {
                anyhow::bail!("User '{}' or email '{}' already exists", username, email);
            }

            let user = users
                .create(NewUser {
                    username,
                    email: email.trim().to_string(),
                    password_hash: hash_password(&password)?,
                    service,
                })
                .await?;

            output_success(
                &output_format,
                &format!("Created user '{}' in {}", user.username, user.service),
                Some(Map::from_iter([(
                    "user".to_string(),
                    json!({
                        "id": user.id,
                        "username": user.username,
                        "email": user.email,
                        "service": user.service,
                    }),
                )])),
            )
        }
        UserCommands::List { query } => {
            let pattern = normalize_query(query.as_deref()).map(like_pattern);
            let users = UserRepository::new(connect().await?)
                .search(pattern.as_deref())
                .await?;

            match output_format {
                OutputFormat::Json => print_json(&json!({ "count": users.len(), "users": users }))?,
                OutputFormat::Text if users.is_empty() => println!("No users found"),
                OutputFormat::Text => {
                    let admin_service = &config::config().desk.admin_service;
                    println!("{:<20} {:<30} {:<25} {}", "USERNAME", "EMAIL", "SERVICE", "CREATED");
                    println!("{}", "-".repeat(90));

                    for user in &users {
                        let marker = if &user.service == admin_service { "*" } else { " " };
                        println!(
                            "{}{:<19} {:<30} {:<25} {}",
                            marker,
                            user.username,
                            user.email,
                            user.service,
                            user.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }

            Ok(())
        }
    }
}
