//! Command definitions and execution for `licensectl`.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use encryptico_license::{
    default_license_path, generate_key, is_valid, Validator, DEFAULT_ITERATIONS,
    DEFAULT_SALT_LENGTH,
};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "licensectl")]
#[command(about = "Issue and verify Encryptico offline license keys")]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Work factor shared by every key operation.
#[derive(Args, Debug, Clone, Copy)]
pub struct ParamArgs {
    /// PBKDF2 iteration count
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: u32,

    /// Salt length in bytes
    #[arg(long, default_value_t = DEFAULT_SALT_LENGTH)]
    pub salt_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new license key
    Generate {
        /// Vendor password the key is derived from
        #[arg(short, long)]
        password: String,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Verify a license key string
    Verify {
        /// License key to verify
        #[arg(short, long)]
        key: String,

        /// Vendor password
        #[arg(short, long)]
        password: String,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Write a license file for an existing key
    Issue {
        /// License key to store
        #[arg(short, long)]
        key: String,

        /// Vendor password
        #[arg(short, long)]
        password: String,

        #[command(flatten)]
        params: ParamArgs,

        /// Destination file or directory (defaults to the platform data directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Verify a local license file
    Check {
        /// License file (defaults to the platform data directory)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Result of a command, printed on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A freshly generated key.
    Key(String),
    /// A license file was written.
    Issued(PathBuf),
    /// The key or license file verified.
    Valid,
    /// The key or license file did not verify.
    Invalid,
    /// No license file at the checked path.
    Missing,
}

impl Outcome {
    /// Whether the process should exit successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Key(_) | Self::Issued(_) | Self::Valid)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Issued(path) => write!(f, "{}", path.display()),
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

/// Executes a command.
pub fn run(command: &Command) -> Result<Outcome> {
    match command {
        Command::Generate { password, params } => {
            let key = generate_key(password, params.iterations, params.salt_length)
                .context("Failed to generate license key")?;
            info!(
                iterations = params.iterations,
                salt_length = params.salt_length,
                "Generated key"
            );
            Ok(Outcome::Key(key))
        }
        Command::Verify {
            key,
            password,
            params,
        } => {
            let valid = is_valid(key, password, params.iterations, params.salt_length);
            debug!(valid, "Verified key");
            Ok(if valid { Outcome::Valid } else { Outcome::Invalid })
        }
        Command::Issue {
            key,
            password,
            params,
            out,
        } => {
            let validator = Validator::new(
                key.as_str(),
                password.as_str(),
                params.iterations,
                params.salt_length,
            )
            .context("Invalid license arguments")?;
            let target = out.clone().unwrap_or_else(default_license_path);
            let written = validator
                .generate_license(&target)
                .with_context(|| format!("Failed to write license file {}", target.display()))?;
            Ok(Outcome::Issued(written))
        }
        Command::Check { file } => {
            let path = file.clone().unwrap_or_else(default_license_path);
            let validator = Validator::from_file(&path).context("Invalid license file path")?;
            if !validator.has_local_license() {
                info!(path = %path.display(), "No license file");
                return Ok(Outcome::Missing);
            }
            let valid = validator
                .is_local_license_valid()
                .with_context(|| format!("Failed to read license file {}", path.display()))?;
            Ok(if valid { Outcome::Valid } else { Outcome::Invalid })
        }
    }
}
