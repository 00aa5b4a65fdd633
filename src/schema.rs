use schemars::schema_for;

use option_yield::model::AnalysisRow;

/// Print the JSON Schema of one derived analysis row (strikes, premiums,
/// margin and IRR per leg), for consumers of the JSON export.
pub fn run() -> anyhow::Result<()> {
    let row_schema = schema_for!(AnalysisRow);
    println!("{}", serde_json::to_string_pretty(&row_schema)?);
    Ok(())
}
