use schemars::schema_for;
use serde_json::Value;
use types::{Gene, Instance, SolveParams};

/// JSON schemas of the documents the binary reads.
pub fn run() -> serde_json::Result<Value> {
    Ok(serde_json::json!({
        "instance": serde_json::to_value(schema_for!(Instance))?,
        "params": serde_json::to_value(schema_for!(SolveParams))?,
        "genes": serde_json::to_value(schema_for!(Vec<Gene>))?,
    }))
}
