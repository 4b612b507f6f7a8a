use std::{path::PathBuf, time::Duration};

use anyhow::bail;
use clap::{Parser, Subcommand};
use neuronbridge::{generator::RetryPolicy, id::JacsUid};

/// Runtime configuration for the `neuronbridge` binary.
///
/// Generator settings can come from CLI arguments or environment variables
/// (including a `.env` file in the working directory).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "neuronbridge",
    version,
    about = "Mint JACS UIDs and list NeuronBridge image buckets"
)]
pub struct CliArgs {
    /// Deployment context embedded in generated UIDs (0 to 15).
    ///
    /// Environment variable: `DEPLOYMENT_CONTEXT`
    #[arg(long, env = "DEPLOYMENT_CONTEXT", default_value_t = 2)]
    pub deployment_context: u8,

    /// Host component embedded in generated UIDs. When unset, the last
    /// octet of this machine's IPv4 address is used.
    ///
    /// Environment variable: `HOST_COMPONENT`
    #[arg(long, env = "HOST_COMPONENT")]
    pub host_component: Option<u8>,

    /// Pause between generation attempts while the generator is pending.
    ///
    /// Environment variable: `RETRY_BACKOFF_MS`
    #[arg(long, env = "RETRY_BACKOFF_MS", default_value_t = 500)]
    pub retry_backoff_ms: u64,

    /// Give up on a UID after this long and exit with an error.
    ///
    /// Environment variable: `RETRY_DEADLINE_MS`
    #[arg(long, env = "RETRY_DEADLINE_MS", default_value_t = 30_000)]
    pub retry_deadline_ms: u64,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print new JACS UIDs, one per line.
    Generate {
        /// Number of UIDs to print.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// A previously issued UID the first new one must differ from.
        #[arg(long)]
        last_id: Option<JacsUid>,
    },

    /// Break JACS UIDs down into their fields.
    Decode {
        #[arg(required = true)]
        uids: Vec<JacsUid>,

        /// Print one JSON object per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List every object in a local bucket mirror.
    List {
        #[command(flatten)]
        bucket: BucketArgs,
    },

    /// List the folders directly below a prefix of a local bucket mirror.
    Prefixes {
        #[command(flatten)]
        bucket: BucketArgs,

        #[arg(long, default_value = "/")]
        delimiter: String,

        /// Print only the last folder name, without delimiters.
        #[arg(long, default_value_t = false)]
        names: bool,

        /// Keep only alignment template folders (`JRC<digits>.../`).
        #[arg(long, default_value_t = false)]
        templates: bool,
    },

    /// List the release version directories (`v<digit>...`) under a root.
    Versions {
        /// Directory holding one subdirectory per release.
        #[arg(long)]
        root: PathBuf,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct BucketArgs {
    /// Directory holding the bucket's objects.
    #[arg(long)]
    pub root: PathBuf,

    /// Bucket name.
    #[arg(long)]
    pub bucket: String,

    /// Only list keys starting with this prefix.
    #[arg(long)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub deployment_context: u8,
    pub host_component: Option<u8>,
    pub policy: RetryPolicy,
    pub verbose: bool,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let max_context = JacsUid::max_deployment_context();
        if args.deployment_context > max_context {
            bail!(
                "DEPLOYMENT_CONTEXT ({}) exceeds the 4-bit context field (max = {})",
                args.deployment_context,
                max_context
            );
        }

        if args.retry_backoff_ms == 0 {
            bail!("RETRY_BACKOFF_MS must be greater than 0");
        }

        if args.retry_deadline_ms < args.retry_backoff_ms {
            bail!(
                "RETRY_DEADLINE_MS ({}) must be at least RETRY_BACKOFF_MS ({})",
                args.retry_deadline_ms,
                args.retry_backoff_ms
            );
        }

        if matches!(args.command, Command::Generate { count: 0, .. }) {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            deployment_context: args.deployment_context,
            host_component: args.host_component,
            policy: RetryPolicy::new(
                Duration::from_millis(args.retry_backoff_ms),
                Duration::from_millis(args.retry_deadline_ms),
            ),
            verbose: args.verbose,
            command: args.command,
        })
    }
}
