//! Record serialization back into delimited text.

use gdx_model::{Record, Schema};

use crate::error::{OutputError, Result};

/// Render a record as one delimited line in schema order.
///
/// Field position `i` in the schema produces the `i`-th token; absent
/// fields serialize as empty tokens. A token is quoted only when it embeds
/// the delimiter or a quote, mirroring what the parser accepts.
pub fn serialize_record(schema: &Schema, record: &Record) -> String {
    let delimiter = schema.delimiter();
    let tokens: Vec<String> = schema
        .fields()
        .iter()
        .map(|field| quote_token(record.get(&field.name).unwrap_or(""), delimiter))
        .collect();
    tokens.join(&delimiter.to_string())
}

/// Render a record as one JSON object line (structured output format).
pub fn json_line(record: &Record) -> Result<String> {
    serde_json::to_string(record).map_err(|source| OutputError::Serialize { source })
}

fn quote_token(token: &str, delimiter: char) -> String {
    if token.contains(delimiter) || token.contains('"') {
        format!("\"{}\"", token.replace('"', "\"\""))
    } else {
        token.to_string()
    }
}
