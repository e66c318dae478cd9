//! StaffDesk operator CLI.
//!
//! Thin wrapper around the client library for scripting and smoke checks:
//! log in, inspect the session, list employees, pull dashboard counters,
//! and move documents in and out of the archive.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use staffdesk_client::api::{absences, access, auth, cards, employees, ApiClient};
use staffdesk_client::session::{FileStore, KeychainStore, SessionStore};

#[derive(Parser)]
#[command(name = "staffdesk", about = "StaffDesk administration console client")]
struct Args {
    /// Where the session credential is persisted.
    #[arg(long, value_enum, default_value = "keychain")]
    store: StoreKind,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreKind {
    Keychain,
    File,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and persist the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the persisted session
    Logout,
    /// Show the logged-in account and its roles
    Whoami,
    /// List employees
    Employees,
    /// Print the dashboard counters
    Dashboard,
    /// Download a document to a local file
    DownloadDocument {
        document_id: i64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Upload a document for an employee
    UploadDocument {
        employee_id: i64,
        file: PathBuf,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() {
    // Share configuration with deployments that keep it in a .env file.
    let _ = dotenvy::dotenv();

    env_logger::init();

    // Base URL: STAFFDESK_API_URL > localhost default.
    let base_url = std::env::var("STAFFDESK_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    let args = Args::parse();
    let store: Arc<dyn SessionStore> = match args.store {
        StoreKind::Keychain => Arc::new(KeychainStore::new()),
        StoreKind::File => Arc::new(FileStore::new()),
    };
    let client = ApiClient::new(&base_url, store);

    if let Err(e) = run(&client, args.command).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(client: &ApiClient, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Login { username, password } => {
            let session = auth::login(client, &username, &password).await?;
            println!(
                "logged in as {} (roles: {})",
                session.user.username,
                session.roles.join(", ")
            );
        }
        Command::Logout => {
            auth::logout(client)?;
            println!("logged out");
        }
        Command::Whoami => match auth::current_session(client)? {
            Some(session) => {
                println!("{} <{}>", session.user.username, session.user.email);
                println!("roles: {}", session.roles.join(", "));
            }
            None => println!("not logged in"),
        },
        Command::Employees => {
            for employee in employees::list(client).await? {
                println!("{:>5}  {} {}", employee.id, employee.name, employee.surname);
            }
        }
        Command::Dashboard => {
            println!("employees:     {}", employees::count(client).await?);
            println!("at work now:   {}", access::at_work_count(client).await?);
            println!("absent today:  {}", absences::today_approved_count(client).await?);
            println!("active badges: {}", cards::count(client).await?);
        }
        Command::DownloadDocument { document_id, out } => {
            let bytes = employees::download_document(client, document_id).await?;
            std::fs::write(&out, &bytes)?;
            println!("wrote {} bytes to {}", bytes.len(), out.display());
        }
        Command::UploadDocument {
            employee_id,
            file,
            description,
        } => {
            let data = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("document")
                .to_string();
            let document = employees::upload_document(
                client,
                employee_id,
                &file_name,
                "application/octet-stream",
                data,
                &description,
            )
            .await?;
            println!("uploaded document {} ({})", document.id, document.file_name);
        }
    }
    Ok(())
}
