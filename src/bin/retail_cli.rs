use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use retail_store_api::{
    auth::{AuthConfig, AuthService},
    commands::users::CreateUserCommand,
    config::{self, AppConfig},
    db::{self, DbPool},
    entities::user::{self, UserRole},
    logging,
    services::users::UserService,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "retail-cli", about = "Operational tooling for the retail store API")]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON when available"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Register an actor profile
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        fullname: String,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Mint a bearer token for a stored user
    IssueToken {
        #[arg(long)]
        user_id: Uuid,
    },
    /// List registered users
    ListUsers,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Cashier,
    Manager,
    Importer,
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Cashier => UserRole::Cashier,
            RoleArg::Manager => UserRole::Manager,
            RoleArg::Importer => UserRole::Importer,
        }
    }
}

#[derive(Serialize)]
struct IssuedToken {
    user_id: Uuid,
    role: UserRole,
    token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let context = CliContext::initialize().await?;

    match cli.command {
        Commands::Migrate => {
            db::run_migrations(&context.db)
                .await
                .context("failed to run migrations")?;
            println!("Migrations applied");
        }
        Commands::CreateUser {
            email,
            fullname,
            role,
            avatar,
        } => {
            let created = context
                .users
                .create_user(CreateUserCommand {
                    email,
                    fullname,
                    avatar,
                    role: role.into(),
                })
                .await
                .map_err(|e| anyhow!("failed to create user: {}", e))?;
            if cli.json {
                print_json(&created)?;
            } else {
                render_user(&created);
            }
        }
        Commands::IssueToken { user_id } => {
            let stored = context
                .users
                .get_user(user_id)
                .await
                .map_err(|e| anyhow!("failed to load user: {}", e))?
                .ok_or_else(|| anyhow!("user {} not found", user_id))?;
            let token = context
                .auth
                .issue_token(stored.id, stored.role)
                .context("failed to issue token")?;
            if cli.json {
                print_json(&IssuedToken {
                    user_id: stored.id,
                    role: stored.role,
                    token,
                })?;
            } else {
                println!("{}", token);
            }
        }
        Commands::ListUsers => {
            let users = context
                .users
                .list_users()
                .await
                .map_err(|e| anyhow!("failed to list users: {}", e))?;
            if cli.json {
                print_json(&users)?;
            } else if users.is_empty() {
                println!("No users registered");
            } else {
                users.iter().for_each(render_user);
            }
        }
    }

    Ok(())
}

struct CliContext {
    db: Arc<DbPool>,
    auth: AuthService,
    users: UserService,
}

impl CliContext {
    async fn initialize() -> Result<Self> {
        let cfg: AppConfig = config::load_config().context("failed to load application config")?;
        config::init_tracing(cfg.log_level(), cfg.log_json);

        let db_pool = db::establish_connection_from_app_config(&cfg)
            .await
            .context("failed to connect to database")?;
        let db = Arc::new(db_pool);

        let auth = AuthService::new(AuthConfig::from(&cfg));
        let users = UserService::new(db.clone(), logging::discard_logger());

        Ok(Self { db, auth, users })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_user(user: &user::Model) {
    println!(
        "- {} • {} • {} • {}",
        user.id, user.email, user.fullname, user.role
    );
}
