use std::path::Path;

use serde_json::json;
use vscterm_model::ContractDescriptor;

use crate::input::load_contracts;
use crate::{fail, OutputFormat};

pub(crate) fn cmd_functions(
    contracts_path: &Path,
    contract: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) {
    let config = match load_contracts(contracts_path) {
        Ok(c) => c,
        Err(msg) => fail(&msg, output, quiet),
    };

    let selected: Vec<&ContractDescriptor> = match contract {
        Some(id) => match config.require_contract(id) {
            Ok(c) => vec![c],
            Err(e) => fail(&e.to_string(), output, quiet),
        },
        None => config.contracts.iter().collect(),
    };

    match output {
        OutputFormat::Text => {
            for c in selected {
                println!("{} ({})", c.name, c.id);
                for f in &c.functions {
                    println!(
                        "  {:<24} {:<5} {} [{} parameters]",
                        f.name,
                        f.parse.as_str(),
                        f.label(),
                        f.parameters.len()
                    );
                }
            }
        }
        OutputFormat::Json => {
            let listing: Vec<serde_json::Value> = selected
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "name": c.name,
                        "functions": c.functions.iter().map(|f| json!({
                            "name": f.name,
                            "label": f.label(),
                            "parse": f.parse,
                            "parameters": f.sorted_parameters()
                                .iter()
                                .map(|p| json!({
                                    "name": p.name,
                                    "key": p.wire_key(),
                                    "type": p.kind.tag(),
                                    "mandatory": p.mandatory,
                                }))
                                .collect::<Vec<_>>(),
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&listing).unwrap_or_default()
            );
        }
    }
}
