//! veriseal-admin — administrative entry point for the verification service.

use clap::Parser;
use std::path::PathBuf;

use veriseal_service::{
    init_tracing, PasswordPolicy, ServiceConfig, ServiceError, VerificationService,
};
use veriseal_store_lmdb::{LmdbEnvironment, LmdbKeyStore, LmdbRecordStore};
use veriseal_types::{Timestamp, UserId};

#[derive(Parser)]
#[command(name = "veriseal-admin", about = "veriseal identity-verification administration")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VERISEAL_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the LMDB store.
    #[arg(long, env = "VERISEAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Provision the system key pair from an administrator password.
    /// One-time: fails if keys already exist.
    CreateKeys {
        #[arg(long, env = "VERISEAL_PASSWORD")]
        password: String,
    },
    /// Check a password against the provisioning policy without touching
    /// the store.
    CheckPassword {
        #[arg(long)]
        password: String,
    },
    /// Show a user's verification status.
    Status {
        #[arg(long)]
        user: u64,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let config = ServiceConfig::from_toml_file(path)?;
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        None => ServiceConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::CreateKeys { password } => {
            let service = open_service(&config)?;
            match service.provision_keys(&password, Timestamp::now()) {
                Ok(()) => println!("keys created"),
                Err(ServiceError::KeysExist) => {
                    println!("keys exist");
                    std::process::exit(1);
                }
                Err(ServiceError::Validation(err)) => {
                    for violation in &err.violations {
                        println!("{violation}");
                    }
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::CheckPassword { password } => {
            let report = PasswordPolicy::default().check(&password);
            for violation in &report.errors {
                println!("error: {violation}");
            }
            for advisory in &report.advisories {
                println!("advisory: {advisory}");
            }
            if report.errors.is_empty() {
                println!("password accepted");
            } else {
                std::process::exit(1);
            }
        }
        Command::Status { user } => {
            let service = open_service(&config)?;
            println!("{}", service.status(&UserId::new(user))?);
        }
    }

    Ok(())
}

fn open_service(
    config: &ServiceConfig,
) -> anyhow::Result<VerificationService<LmdbKeyStore, LmdbRecordStore>> {
    std::fs::create_dir_all(&config.data_dir)?;
    let env = LmdbEnvironment::open(&config.data_dir, config.map_size)?;
    Ok(VerificationService::new(
        env.key_store(),
        env.record_store(),
        config,
    ))
}
