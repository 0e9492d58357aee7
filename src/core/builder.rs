use crate::domain::model::{LineOutcome, Record, Rejection};

pub const SEPARATOR: char = ';';

const MIN_FIELDS: usize = 5;
const CODE_COLUMN: usize = 2;
const TERRITORY_COLUMN: usize = 3;
const CONSUMPTION_COLUMN: usize = 4;

/// 以 `;` 切欄位，不支援引號跳脫。
///
/// Trailing empty fields are dropped, so `1;x;10;Alpha;` has four fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(SEPARATOR).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

/// 把一行資料轉成紀錄。
///
/// `line_number` is 1-based and counts the header, so the first data line is 2.
pub fn build_record(line_number: usize, line: &str) -> LineOutcome {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return LineOutcome::Skipped;
    }

    let parsed = parse_int(&fields, CODE_COLUMN, "code").and_then(|code| {
        parse_int(&fields, CONSUMPTION_COLUMN, "consumption").map(|consumption| (code, consumption))
    });

    match parsed {
        Ok((code, consumption)) => {
            let territory = trim_field(fields[TERRITORY_COLUMN]);
            LineOutcome::Parsed(Record::new(code, territory, consumption))
        }
        Err((column, reason)) => LineOutcome::Rejected(Rejection {
            line_number,
            line: line.to_string(),
            column,
            reason,
        }),
    }
}

/// Strips ASCII control characters and spaces only; `\u{a0}` and other
/// Unicode whitespace are kept.
fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c <= ' ')
}

fn parse_int(
    fields: &[&str],
    index: usize,
    column: &'static str,
) -> Result<i32, (&'static str, String)> {
    let raw = trim_field(fields[index]);
    raw.parse::<i32>()
        .map_err(|e| (column, format!("'{}' is not an integer: {}", raw, e)))
}
