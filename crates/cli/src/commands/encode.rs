use std::path::Path;
use std::process;

use vscterm_payload::{build_request, propose_updates, KeyType};

use crate::config::TerminalConfig;
use crate::input::{load_balances, load_contracts, load_values};
use crate::{fail, OutputFormat, ValueArgs, EXIT_INVALID};

use super::validate::{collect_issues, report_issues};

pub(crate) struct EncodeOptions<'a> {
    pub contracts_path: &'a Path,
    pub contract: &'a str,
    pub function: &'a str,
    pub values: &'a ValueArgs,
    pub settings: &'a TerminalConfig,
    pub key_type: Option<KeyType>,
    pub autofill: bool,
    pub strict: bool,
    pub output: OutputFormat,
    pub quiet: bool,
}

pub(crate) fn cmd_encode(opts: EncodeOptions<'_>) {
    let EncodeOptions { output, quiet, .. } = opts;

    let config = load_contracts(opts.contracts_path).unwrap_or_else(|msg| fail(&msg, output, quiet));
    let contract = config
        .require_contract(opts.contract)
        .unwrap_or_else(|e| fail(&e.to_string(), output, quiet));
    let func = contract
        .require_function(opts.function)
        .unwrap_or_else(|e| fail(&e.to_string(), output, quiet));
    let mut values = load_values(opts.values).unwrap_or_else(|msg| fail(&msg, output, quiet));

    if opts.autofill {
        let patch = propose_updates(func, &values);
        values.extend(patch);
    }

    if opts.strict {
        let balances = load_balances(opts.values, opts.settings)
            .unwrap_or_else(|msg| fail(&msg, output, quiet));
        let issues = collect_issues(func, &values, &balances);
        if !issues.is_empty() {
            report_issues(&issues, output, quiet);
            process::exit(EXIT_INVALID);
        }
    }

    let request = build_request(
        contract,
        func,
        &values,
        &opts.settings.request_settings(opts.key_type),
    );
    tracing::info!(
        contract = %request.contract_id,
        action = %request.action,
        intents = request.intents.len(),
        "built broadcast request"
    );

    match output {
        OutputFormat::Text => {
            println!("contract  {}", request.contract_id);
            println!("action    {}", request.action);
            println!("payload   {}", request.payload);
            println!("rc_limit  {}", request.rc_limit);
            println!(
                "key_type  {}",
                match request.key_type {
                    KeyType::Active => "active",
                    KeyType::Posting => "posting",
                }
            );
            for intent in &request.intents {
                println!(
                    "intent    {} {} {}",
                    intent.kind, intent.args.token, intent.args.limit
                );
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&request).unwrap_or_default()
            );
        }
    }
}
