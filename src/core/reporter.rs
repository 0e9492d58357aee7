use crate::domain::model::{ExportFormat, Ranking, Record, Rejection};
use crate::utils::error::{ReportError, Result};
use std::cmp::Reverse;
use std::io::{self, Write};

pub const DIAGNOSTIC_PREFIX: &str = "Could not convert to number: ";

/// 依用量由大到小排序；`sort_by_key` 是穩定排序，同值保留檔案順序
pub fn rank(mut records: Vec<Record>, limit: usize) -> Ranking {
    records.sort_by_key(|record| Reverse(record.consumption()));
    Ranking { records, limit }
}

pub fn write_diagnostic<W: Write>(out: &mut W, rejection: &Rejection) -> io::Result<()> {
    writeln!(out, "{}{}", DIAGNOSTIC_PREFIX, rejection.line)
}

pub fn report_header(limit: usize) -> String {
    format!("Top {} records by consumption:", limit)
}

pub fn format_record(record: &Record) -> String {
    format!(
        "Code: {}, Territory: {}, Consumption: {}",
        record.code(),
        record.territory(),
        record.consumption()
    )
}

/// Writes the header and one line per top record; returns the number of detail lines.
pub fn render_report<W: Write>(ranking: &Ranking, out: &mut W) -> io::Result<usize> {
    writeln!(out, "{}", report_header(ranking.limit))?;
    let top = ranking.top();
    for record in top {
        writeln!(out, "{}", format_record(record))?;
    }
    out.flush()?;
    Ok(top.len())
}

pub fn export_bytes(records: &[Record], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => delimited_bytes(records, b';'),
        ExportFormat::Tsv => delimited_bytes(records, b'\t'),
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
    }
}

fn delimited_bytes(records: &[Record], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    // 沒有資料時 serialize 不會寫出標頭，手動補上
    if records.is_empty() {
        writer.write_record(["code", "territory", "consumption"])?;
    }
    writer.into_inner().map_err(|e| ReportError::ExportError {
        message: format!("Failed to flush export buffer: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(ranking: &Ranking) -> (String, usize) {
        let mut out = Vec::new();
        let lines = render_report(ranking, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), lines)
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let records = vec![
            Record::new(1, "A", 500),
            Record::new(2, "B", 900),
            Record::new(3, "C", 500),
            Record::new(4, "D", 100),
            Record::new(5, "E", 900),
        ];
        let ranking = rank(records, 3);
        let codes: Vec<i32> = ranking.records.iter().map(Record::code).collect();
        assert_eq!(codes, vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_render_top_three() {
        let records = vec![
            Record::new(1, "A", 500),
            Record::new(2, "B", 900),
            Record::new(3, "C", 100),
            Record::new(4, "D", 700),
        ];
        let (text, lines) = render(&rank(records, 3));

        assert_eq!(lines, 3);
        assert_eq!(
            text,
            "Top 3 records by consumption:\n\
             Code: 2, Territory: B, Consumption: 900\n\
             Code: 4, Territory: D, Consumption: 700\n\
             Code: 1, Territory: A, Consumption: 500\n"
        );
    }

    #[test]
    fn test_render_empty_prints_header_only() {
        let (text, lines) = render(&rank(Vec::new(), 3));
        assert_eq!(lines, 0);
        assert_eq!(text, "Top 3 records by consumption:\n");
    }

    #[test]
    fn test_diagnostic_contains_raw_line() {
        let rejection = Rejection {
            line_number: 4,
            line: "1;x;abc;Beta;50".to_string(),
            column: "code",
            reason: "invalid digit".to_string(),
        };
        let mut out = Vec::new();
        write_diagnostic(&mut out, &rejection).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Could not convert to number: 1;x;abc;Beta;50\n"
        );
    }

    #[test]
    fn test_csv_export_uses_semicolons() {
        let bytes = export_bytes(&[Record::new(10, "Alpha", 500)], ExportFormat::Csv).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "code;territory;consumption\n10;Alpha;500\n"
        );
    }

    #[test]
    fn test_tsv_export_of_empty_ranking_keeps_header() {
        let bytes = export_bytes(&[], ExportFormat::Tsv).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "code\tterritory\tconsumption\n");
    }

    #[test]
    fn test_json_export() {
        let bytes = export_bytes(&[Record::new(10, "Alpha", 500)], ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"code": 10, "territory": "Alpha", "consumption": 500}])
        );
    }
}
