mod commands;
mod config;
mod input;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vscterm_payload::KeyType;

use crate::config::{read_terminal_config, TerminalConfig};
use crate::logging::LogFormat;

/// Exit code for a call that is incomplete or unaffordable.
pub(crate) const EXIT_INVALID: i32 = 2;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Signing key requested for the broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KeyTypeArg {
    Active,
    Posting,
}

impl From<KeyTypeArg> for KeyType {
    fn from(arg: KeyTypeArg) -> Self {
        match arg {
            KeyTypeArg::Active => KeyType::Active,
            KeyTypeArg::Posting => KeyType::Posting,
        }
    }
}

/// Composite string fields understood by `vscterm codec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CodecField {
    /// Poll options: text###url;...
    Poll,
    /// Payout list: receiver:amount:asset;...
    Payouts,
    /// Meta updates: update_key=value;...
    Meta,
    /// Lottery metadata: postUrl###donationUrl###description
    Lottery,
    /// Simple winner shares: 50,30,20
    Winners,
    /// Per-asset winner shares: (50#hive,60#hbd#fixed);...
    Shares,
    /// Inter-contract call: contract|action|payload|asset=amount,...
    Icc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CodecDirection {
    /// Wire string to JSON
    Parse,
    /// JSON to wire string
    Serialize,
}

/// Parameter values for one call.
#[derive(Args, Debug, Default)]
pub(crate) struct ValueArgs {
    /// JSON file holding the parameter value map
    #[arg(long)]
    values: Option<PathBuf>,
    /// Set one value, KEY=VALUE (repeatable); VALUE is read as JSON when it parses
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// JSON file with wallet balances (hive, hbd, hbd_savings)
    #[arg(long)]
    balances: Option<PathBuf>,
}

/// VSC dApp terminal toolkit: encode and validate contract calls.
#[derive(Parser)]
#[command(name = "vscterm", version, about = "VSC dApp terminal toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Terminal settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Contract configuration file (JSON)
    #[arg(long, global = true)]
    contracts: Option<PathBuf>,

    /// Log format for diagnostics on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured contracts and their functions
    Functions {
        /// Only this contract (id or name)
        contract: Option<String>,
    },

    /// Encode a function call into a broadcast request
    Encode {
        /// Contract id or name
        contract: String,
        /// Function name
        function: String,
        #[command(flatten)]
        values: ValueArgs,
        /// Signing key (overrides the settings file)
        #[arg(long, value_enum)]
        key_type: Option<KeyTypeArg>,
        /// Apply derived values (static meta options, account prefixes) first
        #[arg(long)]
        autofill: bool,
        /// Refuse to encode a call that fails validation
        #[arg(long)]
        strict: bool,
    },

    /// Check that a function call is complete and affordable
    Validate {
        /// Contract id or name
        contract: String,
        /// Function name
        function: String,
        #[command(flatten)]
        values: ValueArgs,
    },

    /// Parse or serialize a composite string field
    Codec {
        #[arg(value_enum)]
        field: CodecField,
        #[arg(value_enum)]
        direction: CodecDirection,
        /// Wire string to parse, or JSON to serialize
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => match read_terminal_config(path) {
            Ok(c) => c,
            Err(msg) => fail(&msg, cli.output, cli.quiet),
        },
        None => TerminalConfig::default(),
    };

    logging::setup_tracing(
        cli.log_format
            .or(settings.terminal.log_format)
            .unwrap_or_default(),
    );

    let contracts_path = settings.contracts_path(cli.contracts.as_deref());

    match cli.command {
        Commands::Functions { contract } => {
            commands::cmd_functions(&contracts_path, contract.as_deref(), cli.output, cli.quiet);
        }
        Commands::Encode {
            contract,
            function,
            values,
            key_type,
            autofill,
            strict,
        } => {
            commands::cmd_encode(commands::EncodeOptions {
                contracts_path: &contracts_path,
                contract: &contract,
                function: &function,
                values: &values,
                settings: &settings,
                key_type: key_type.map(KeyType::from),
                autofill,
                strict,
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Validate {
            contract,
            function,
            values,
        } => {
            commands::cmd_validate(
                &contracts_path,
                &contract,
                &function,
                &values,
                &settings,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Codec {
            field,
            direction,
            input,
        } => {
            commands::cmd_codec(field, direction, &input, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Report `msg` and exit with status 1.
pub(crate) fn fail(msg: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(msg, output, quiet);
    process::exit(1);
}
