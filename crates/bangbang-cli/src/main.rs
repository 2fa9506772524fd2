use anyhow::Context;
use bangbang_cli::accounts::{self, NewAccount};
use bangbang_cli::seeder::{self, SeedOutcome};
use bangbang_db::{PgPool, init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "bangbang-cli")]
#[command(about = "BangBang CLI - Administrative tools for the bakery API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a superadmin account
    CreateSuperadmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed categories, demo products, shop settings and demo accounts
    Seed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateSuperadmin {
            name,
            email,
            password,
        } => handle_create_superadmin(&pool, name, email, password).await,
        Commands::Seed => handle_seed(&pool).await,
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(pool)
}

fn prompt_account(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<NewAccount> {
    let name = match name {
        Some(name) => name,
        None => Input::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    Ok(NewAccount {
        name,
        email,
        password,
    })
}

async fn handle_create_superadmin(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let account = match prompt_account(name, email, password) {
        Ok(account) => account,
        Err(e) => {
            eprintln!("\n❌ Failed to read account details: {}", e);
            std::process::exit(1);
        }
    };

    match accounts::create_superadmin(pool, &account).await {
        Ok(id) => {
            println!("\n✅ Superadmin created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", account.email);
            println!("   Name: {}", account.name.trim());
        }
        Err(e) => {
            eprintln!("\n❌ Error creating superadmin: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool) {
    match seeder::seed_all(pool).await {
        Ok(SeedOutcome::Seeded) => {
            for account in seeder::data::ACCOUNTS {
                println!();
                println!("📋 {} Login:", account.role);
                println!("   Email: {}", account.email);
                println!("   Password: {}", account.password);
            }
        }
        Ok(SeedOutcome::AlreadySeeded) => {}
        Err(e) => {
            eprintln!("\n❌ Error seeding database: {:#}", e);
            std::process::exit(1);
        }
    }
}
