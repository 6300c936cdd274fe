use std::path::Path;
use std::process;

use vscterm_model::{Balances, FunctionDescriptor, ParameterValueMap};
use vscterm_payload::{describe_bounds, describe_missing};

use crate::config::TerminalConfig;
use crate::input::{load_balances, load_contracts, load_values};
use crate::{fail, OutputFormat, ValueArgs, EXIT_INVALID};

pub(crate) fn cmd_validate(
    contracts_path: &Path,
    contract: &str,
    function: &str,
    values: &ValueArgs,
    settings: &TerminalConfig,
    output: OutputFormat,
    quiet: bool,
) {
    let config = load_contracts(contracts_path).unwrap_or_else(|msg| fail(&msg, output, quiet));
    let func = config
        .require_contract(contract)
        .and_then(|c| c.require_function(function))
        .unwrap_or_else(|e| fail(&e.to_string(), output, quiet));
    let value_map = load_values(values).unwrap_or_else(|msg| fail(&msg, output, quiet));
    let balances = load_balances(values, settings).unwrap_or_else(|msg| fail(&msg, output, quiet));

    let issues = collect_issues(func, &value_map, &balances);
    if !issues.is_empty() {
        report_issues(&issues, output, quiet);
        process::exit(EXIT_INVALID);
    }

    if !quiet {
        match output {
            OutputFormat::Text => println!("valid"),
            OutputFormat::Json => println!("{}", serde_json::json!({ "valid": true })),
        }
    }
}

/// Missing mandatory fields first, then out-of-range numbers.
pub(crate) fn collect_issues(
    func: &FunctionDescriptor,
    values: &ParameterValueMap,
    balances: &Balances,
) -> Vec<String> {
    let mut issues = describe_missing(func, values, balances);
    issues.extend(describe_bounds(func, values));
    issues
}

/// Print validation issues to stderr.
pub(crate) fn report_issues(issues: &[String], output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => {
            eprintln!("invalid");
            for issue in issues {
                eprintln!("  - {}", issue);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": false,
                "issues": issues,
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
}
