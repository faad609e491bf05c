//! Command line tool to build, sign and broadcast ledger transactions.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use structopt::clap::AppSettings;
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tx_cli::commands::{keypair, kinds, send, sign};
use tx_cli::{CliError, ClientConfig, RequestContext};
use tx_core::{CoreError, TransactionKind};

/// Command line arguments.
#[derive(Debug, StructOpt)]
#[structopt(name = "tx", about = "Build, sign and broadcast ledger transactions")]
struct Opt {
    /// Plain-text private key
    #[structopt(short = "K", long = "key", global = true)]
    key: Option<String>,

    /// File holding the private key
    #[structopt(short = "F", long = "file", parse(from_os_str), global = true)]
    file: Option<PathBuf>,

    /// Username of the transactor
    #[structopt(short = "M", long = "me", global = true)]
    me: Option<String>,

    /// Ledger API url
    #[structopt(short = "A", long = "api", global = true)]
    api: Option<String>,

    /// Repeats the transaction every delay (in ms)
    #[structopt(short = "S", long = "spam", global = true)]
    spam: Option<u64>,

    /// Path to a JSON configuration file
    #[structopt(short = "c", long = "config", parse(from_os_str), global = true)]
    config: Option<PathBuf>,

    /// Write the merged configuration to this path
    #[structopt(long = "save-config", parse(from_os_str), global = true)]
    save_config: Option<PathBuf>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands.
#[derive(Debug, StructOpt)]
enum Command {
    /// Generate a new keypair
    #[structopt(name = "keypair", alias = "key")]
    Keypair {
        /// Public key prefix
        #[structopt(short = "P", long)]
        prefix: Option<String>,
    },

    /// Sign a transaction w/o broadcasting, e.g. '{"type":7,"data":{"target":"bob"}}'
    #[structopt(name = "sign")]
    Sign { transaction: String },

    /// List transaction types and their fields
    #[structopt(name = "kinds")]
    Kinds,

    /// Create a new account
    #[structopt(name = "account")]
    Account { pub_key: String, new_user: String },

    /// Vote for a leader
    #[structopt(name = "vote-leader")]
    VoteLeader { leader: String },

    /// Remove a leader vote
    #[structopt(name = "unvote-leader")]
    UnvoteLeader { leader: String },

    /// Transfer coins
    #[structopt(name = "transfer", alias = "xfer", setting = AppSettings::AllowNegativeNumbers)]
    Transfer { receiver: String, amount: String },

    /// Publish a new JSON content
    #[structopt(name = "comment", setting = AppSettings::AllowNegativeNumbers)]
    Comment {
        /// An arbitrary string identifying your content
        link: String,
        /// Parent author (if you are replying to another comment)
        pa: String,
        /// Parent link (if you are replying to another comment)
        pp: String,
        /// A json object
        json: String,
        /// The amount of VT to spend on the forced vote
        vt: String,
        /// The tag of the forced vote
        tag: String,
    },

    /// Modify an account profile
    #[structopt(name = "profile", alias = "userJson")]
    Profile { json: String },

    /// Start following another user
    #[structopt(name = "follow", alias = "subscribe")]
    Follow { target: String },

    /// Stop following another user
    #[structopt(name = "unfollow", alias = "unsubscribe")]
    Unfollow { target: String },

    /// Add new key with custom perms; see `kinds` for transaction types
    #[structopt(name = "new-key")]
    NewKey {
        id: String,
        pub_key: String,
        /// Allowed transaction types, e.g. [4,5,6,7,8]
        allowed_txs: String,
    },

    /// Remove a previously added key
    #[structopt(name = "remove-key")]
    RemoveKey { id: String },

    /// Change the master key of an account
    #[structopt(name = "change-password")]
    ChangePassword {
        /// The new public key that will have full control over your account
        pub_key: String,
    },
}

impl Command {
    /// Maps a transaction subcommand to its kind and positional arguments.
    fn transaction(self) -> Option<(TransactionKind, Vec<String>)> {
        let (kind, args) = match self {
            Command::Keypair { .. } | Command::Sign { .. } | Command::Kinds => return None,
            Command::Account { pub_key, new_user } => (TransactionKind::CreateAccount, vec![pub_key, new_user]),
            Command::VoteLeader { leader } => (TransactionKind::ApproveNode, vec![leader]),
            Command::UnvoteLeader { leader } => (TransactionKind::DisapproveNode, vec![leader]),
            Command::Transfer { receiver, amount } => (TransactionKind::Transfer, vec![receiver, amount]),
            Command::Comment { link, pa, pp, json, vt, tag } => {
                (TransactionKind::Comment, vec![link, pa, pp, json, vt, tag])
            }
            Command::Profile { json } => (TransactionKind::Profile, vec![json]),
            Command::Follow { target } => (TransactionKind::Follow, vec![target]),
            Command::Unfollow { target } => (TransactionKind::Unfollow, vec![target]),
            Command::NewKey { id, pub_key, allowed_txs } => {
                (TransactionKind::NewKey, vec![id, pub_key, allowed_txs])
            }
            Command::RemoveKey { id } => (TransactionKind::RemoveKey, vec![id]),
            Command::ChangePassword { pub_key } => (TransactionKind::ChangePassword, vec![pub_key]),
        };
        Some((kind, args))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging; stdout is kept for command output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    if let Err(e) = run(opt).await {
        match &e {
            CliError::Core(CoreError::MissingCredential(_)) => println!("{}", e.to_string().yellow()),
            _ => println!("{} {}", "Err:".red(), e),
        }
        std::process::exit(1);
    }
    Ok(())
}

/// Merges flags over the configuration file, saving the result when asked.
fn load_config(opt: &Opt) -> Result<ClientConfig, CliError> {
    // Flags win over the configuration file
    let flags = ClientConfig {
        key: opt.key.clone(),
        file: opt.file.clone(),
        me: opt.me.clone(),
        api: opt.api.clone(),
        spam: opt.spam,
    };
    let config = match &opt.config {
        Some(path) => flags.or(ClientConfig::from_file(path)?),
        None => flags,
    };

    if let Some(path) = &opt.save_config {
        config.to_file(path)?;
        info!("Saved configuration to {}", path.display());
    }
    Ok(config)
}

async fn run(opt: Opt) -> Result<(), CliError> {
    let config = load_config(&opt)?;

    match opt.cmd {
        Command::Keypair { prefix } => {
            let record = keypair::run(prefix).await?;
            println!("{}", serde_json::to_string(&record)?);
        }
        Command::Sign { transaction } => {
            let ctx = RequestContext::from_config(&config)?;
            let signed = sign::run(&ctx, &transaction)?;
            println!("{}", signed.to_json());
        }
        Command::Kinds => {
            print!("{}", kinds::run());
        }
        cmd => {
            // Credentials are checked before the arguments are looked at
            let ctx = RequestContext::from_config(&config)?;
            if let Some((kind, args)) = cmd.transaction() {
                debug!("Running {} with {} arguments", kind, args.len());
                send::run(&ctx, kind, &args).await?;
            }
        }
    }
    Ok(())
}
