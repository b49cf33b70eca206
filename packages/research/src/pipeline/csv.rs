//! CSV segmentation adapter.
//!
//! Parses uploaded customer data as delimited, header-rowed tabular input
//! and forwards a bounded slice of rows to the structured extractor for
//! segment synthesis. Inputs that are not tabular fail with a descriptive
//! parse error instead of a guessed schema.

use serde_json::{Map, Value};

use crate::ai::CompletionRequest;
use crate::error::{ResearchError, Result};
use crate::types::{ResearchConfig, SegmentAnalysis, SegmentReport};

use super::extract::Extractor;
use super::prompts::format_segmentation_prompt;

/// Parsed customer data: a header row plus one JSON record per data row.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Value>,
}

/// Parse CSV text with a header row into JSON records.
///
/// Numeric and boolean cells are coerced to their JSON types; blank lines
/// are skipped. Missing headers or zero data rows are parse errors.
pub fn parse_csv(text: &str) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ResearchError::CsvParse {
            reason: e.to_string(),
        })?
        .iter()
        .map(String::from)
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ResearchError::CsvParse {
            reason: "no header row found".to_string(),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ResearchError::CsvParse {
            reason: e.to_string(),
        })?;

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let mut object = Map::with_capacity(headers.len());
        for (header, field) in headers.iter().zip(row.iter()) {
            object.insert(header.clone(), coerce_field(field));
        }
        records.push(Value::Object(object));
    }

    if records.is_empty() {
        return Err(ResearchError::CsvParse {
            reason: "no data rows found in CSV".to_string(),
        });
    }

    Ok(CsvTable { headers, records })
}

/// Synthesize customer segments from parsed CSV data.
///
/// At most `config.max_csv_rows` rows reach the model; the report keeps
/// the full row count so the cap is visible to callers.
pub async fn analyze_segments(
    extractor: &Extractor,
    config: &ResearchConfig,
    table: &CsvTable,
) -> Result<SegmentReport> {
    let total_records = table.records.len();
    let capped = &table.records[..total_records.min(config.max_csv_rows)];

    let prompt = format_segmentation_prompt(capped, total_records);
    let analysis: SegmentAnalysis = extractor
        .extract(CompletionRequest::new(
            prompt,
            config.segmentation_max_tokens,
        ))
        .await?;

    Ok(SegmentReport {
        total_records,
        analysis,
    })
}

/// Coerce a CSV cell into the closest JSON type.
fn coerce_field(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = field.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = field.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    match field {
        "true" | "TRUE" | "True" => Value::Bool(true),
        "false" | "FALSE" | "False" => Value::Bool(false),
        _ => Value::String(field.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let table = parse_csv("name,deal_size\nAcme,1200\nGlobex,8000.5\n").unwrap();
        assert_eq!(table.headers, vec!["name", "deal_size"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0]["name"], "Acme");
        assert_eq!(table.records[0]["deal_size"], 1200);
        assert_eq!(table.records[1]["deal_size"], 8000.5);
    }

    #[test]
    fn test_parse_coerces_booleans_and_blanks() {
        let table = parse_csv("name,churned,note\nAcme,true,\n").unwrap();
        assert_eq!(table.records[0]["churned"], Value::Bool(true));
        assert_eq!(table.records[0]["note"], Value::Null);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let table = parse_csv("name\nAcme\n\nGlobex\n").unwrap();
        assert_eq!(table.records.len(), 2);
    }

    #[test]
    fn test_parse_tolerates_short_rows() {
        let table = parse_csv("name,industry\nAcme\n").unwrap();
        assert_eq!(table.records[0]["name"], "Acme");
        assert!(table.records[0].get("industry").is_none());
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let err = parse_csv("").unwrap_err();
        assert!(matches!(err, ResearchError::CsvParse { .. }));
    }

    #[test]
    fn test_header_only_is_parse_error() {
        let err = parse_csv("name,industry\n").unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }
}
