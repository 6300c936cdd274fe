use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use vscterm_codec::lottery::LotteryMeta;
use vscterm_codec::meta::MetaEntry;
use vscterm_codec::payout::Payout;
use vscterm_codec::poll::PollOption;
use vscterm_codec::winners::ShareTable;
use vscterm_codec::{icc, lottery, meta, payout, poll, winners};

use crate::{fail, CodecDirection, CodecField, OutputFormat};

pub(crate) fn cmd_codec(
    field: CodecField,
    direction: CodecDirection,
    input: &str,
    output: OutputFormat,
    quiet: bool,
) {
    match direction {
        CodecDirection::Parse => {
            let parsed = parse_field(field, input);
            println!(
                "{}",
                serde_json::to_string_pretty(&parsed).unwrap_or_default()
            );
        }
        CodecDirection::Serialize => {
            let wire = serialize_field(field, input).unwrap_or_else(|msg| fail(&msg, output, quiet));
            match output {
                OutputFormat::Text => println!("{}", wire),
                OutputFormat::Json => println!("{}", json!({ "wire": wire })),
            }
        }
    }
}

/// Wire string to its JSON structure. Parsing never fails.
fn parse_field(field: CodecField, raw: &str) -> Value {
    let parsed = match field {
        CodecField::Poll => serde_json::to_value(poll::parse(raw)),
        CodecField::Payouts => serde_json::to_value(payout::parse(raw)),
        CodecField::Meta => serde_json::to_value(meta::parse(raw)),
        CodecField::Lottery => serde_json::to_value(lottery::parse(raw)),
        CodecField::Winners => serde_json::to_value(winners::parse_simple(raw)),
        CodecField::Shares => serde_json::to_value(winners::parse_groups(raw)),
        CodecField::Icc => serde_json::to_value(icc::parse(raw)),
    };
    parsed.unwrap_or(Value::Null)
}

fn from_json<T: DeserializeOwned>(field: CodecField, input: &str) -> Result<T, String> {
    serde_json::from_str(input).map_err(|e| format!("invalid {:?} JSON: {}", field, e).to_lowercase())
}

/// JSON structure to wire string, applying the same checks the form
/// applies on entry.
fn serialize_field(field: CodecField, input: &str) -> Result<String, String> {
    match field {
        CodecField::Poll => {
            let options: Vec<PollOption> = from_json(field, input)?;
            let options: Vec<PollOption> = options
                .iter()
                .map(|o| PollOption::from_input(&o.text, o.url.as_deref().unwrap_or_default()))
                .collect();
            if poll::has_duplicates(&options) {
                return Err("poll options must be unique".to_string());
            }
            Ok(poll::serialize(&options))
        }
        CodecField::Payouts => {
            let entries: Vec<Payout> = from_json(field, input)?;
            let checked = entries
                .iter()
                .map(|p| Payout::new(&p.receiver, &p.amount, &p.asset))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())?;
            Ok(payout::serialize(&checked))
        }
        CodecField::Meta => {
            let entries: Vec<MetaEntry> = from_json(field, input)?;
            Ok(meta::serialize(&entries))
        }
        CodecField::Lottery => {
            let m: LotteryMeta = from_json(field, input)?;
            let m = LotteryMeta::from_input(&m.post_url, &m.donation_url, &m.description);
            Ok(lottery::serialize(&m))
        }
        CodecField::Winners => {
            let shares: Vec<u32> = from_json(field, input)?;
            Ok(winners::serialize_simple(&shares))
        }
        CodecField::Shares => {
            let table: ShareTable = from_json(field, input)?;
            if !table.is_valid() {
                return Err("percentage shares must add up to 100 for every asset".to_string());
            }
            Ok(winners::serialize_groups(&table))
        }
        CodecField::Icc => {
            let call: icc::IccCall = from_json(field, input)?;
            Ok(icc::serialize(&call))
        }
    }
}
