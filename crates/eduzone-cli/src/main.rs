use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use eduzone_cli::seeder::{self, SeedConfig};
use eduzone_config::{AdminConfig, StorageBackend};
use eduzone_db::{PgPool, Repositories, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "eduzone-cli")]
#[command(about = "EduZone CLI - Administrative tools for EduZone", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the embedded database migrations
    Migrate,
    /// Seed the database with the demo catalogue, calendar and accounts
    Seed {
        /// Password for the demo accounts (defaults to SEED_ADMIN_PASSWORD; accounts are skipped without one)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create a new administrator account
    CreateAdmin {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

fn exit_with(message: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let config = AdminConfig::from_env()
        .unwrap_or_else(|e| exit_with(format!("Invalid configuration: {}", e)));

    if config.database.backend == StorageBackend::Memory {
        exit_with("STORAGE_BACKEND=memory has nothing to administer; configure PostgreSQL");
    }

    let pool = init_db_pool(&config.database)
        .await
        .unwrap_or_else(|e| exit_with(format!("Failed to connect to database: {}", e)));

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Seed { password } => {
            let password = password.or_else(|| config.database.seed_admin_password.clone());
            handle_seed(pool, password, config.auth.bcrypt_cost).await
        }
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => handle_create_admin(pool, name, email, password, config.auth.bcrypt_cost).await,
    }
}

async fn handle_migrate(pool: &PgPool) {
    match run_migrations(pool).await {
        Ok(()) => println!("✅ Migrations applied"),
        Err(e) => exit_with(format!("Error running migrations: {}", e)),
    }
}

async fn handle_seed(pool: PgPool, password: Option<String>, bcrypt_cost: u32) {
    let repos = Repositories::postgres(pool);
    let config = SeedConfig::new(password).with_bcrypt_cost(bcrypt_cost);

    match seeder::seed_demo_data(&repos, &config).await {
        Ok(summary) => {
            println!("✅ Seeding complete");
            println!("   Books: {}", summary.books);
            println!("   Teachers: {}", summary.teachers);
            println!("   Calendar events: {}", summary.events);
            println!("   Feedback: {}", summary.feedback);
            println!("   Accounts: {}", summary.accounts);
        }
        Err(e) => exit_with(format!("Error seeding database: {}", e)),
    }
}

async fn handle_create_admin(
    pool: PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    bcrypt_cost: u32,
) {
    let name = name.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Full name")
            .interact_text()
            .unwrap_or_else(|e| exit_with(format!("Failed to read name: {}", e)))
    });

    let email = email.unwrap_or_else(|| {
        Input::new()
            .with_prompt("Email address")
            .interact_text()
            .unwrap_or_else(|e| exit_with(format!("Failed to read email: {}", e)))
    });

    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| exit_with(format!("Failed to read password: {}", e)))
    });

    let repos = Repositories::postgres(pool);
    match seeder::create_admin(&repos, &name, &email, &password, bcrypt_cost).await {
        Ok(user) => {
            println!("\n✅ Administrator created successfully!");
            println!("   {}", seeder::describe(&user));
        }
        Err(e) => exit_with(format!("Error creating administrator: {}", e)),
    }
}
