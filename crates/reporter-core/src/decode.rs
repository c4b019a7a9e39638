use std::io::Read;

use crate::record::DiagnosticRecord;
use crate::CoreError;

/// Decode records from JSON text: a single object, an array of objects, or
/// whitespace/newline separated objects.
pub fn decode_records(input: &str) -> Result<Vec<DiagnosticRecord>, CoreError> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| CoreError::Decode(e.to_string()));
    }

    let mut records = Vec::new();
    let stream = serde_json::Deserializer::from_str(trimmed).into_iter::<DiagnosticRecord>();
    for (i, item) in stream.enumerate() {
        let record = item.map_err(|e| CoreError::Decode(format!("record {}: {}", i + 1, e)))?;
        records.push(record);
    }
    tracing::debug!("decoded {} records", records.len());
    Ok(records)
}

/// Read everything from `reader` and decode it with [`decode_records`].
pub fn read_records<R: Read>(mut reader: R) -> Result<Vec<DiagnosticRecord>, CoreError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode_records(&text)
}
