use crate::constants::OUTPUT_COLUMNS;
use crate::types::ExtractedRecord;

/// Renders the first `limit` records as a left-aligned text table.
pub fn format_preview(records: &[ExtractedRecord], limit: usize) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .take(limit)
        .map(|record| {
            [
                record.precinct_no.clone(),
                record.precinct_name.clone().unwrap_or_default(),
                display_count(record.active),
                display_count(record.inactive),
            ]
        })
        .collect();

    let mut widths = OUTPUT_COLUMNS.map(|title| title.chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_line(&OUTPUT_COLUMNS.map(str::to_string), &widths));
    for row in &rows {
        lines.push(format_line(row, &widths));
    }
    if records.len() > limit {
        lines.push(format!("... {} more rows", records.len() - limit));
    }
    lines.join("\n")
}

fn display_count(count: Option<i64>) -> String {
    count.map(|c| c.to_string()).unwrap_or_else(|| "<NA>".to_string())
}

fn format_line(values: &[String; 4], widths: &[usize; 4]) -> String {
    values
        .iter()
        .zip(widths.iter())
        .map(|(value, &width)| format!("{value:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(no: &str, name: Option<&str>, active: Option<i64>) -> ExtractedRecord {
        ExtractedRecord {
            precinct_no: no.into(),
            precinct_name: name.map(str::to_string),
            active,
            inactive: None,
        }
    }

    #[test]
    fn test_preview_limits_rows() {
        let records: Vec<_> = (1..=12)
            .map(|i| record(&format!("{i:03}"), Some("Ward"), Some(i)))
            .collect();
        let preview = format_preview(&records, 10);
        let lines: Vec<_> = preview.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with("Precinct No."));
        assert!(lines[10].starts_with("010"));
        assert_eq!(lines[11], "... 2 more rows");
    }

    #[test]
    fn test_preview_marks_missing_counts() {
        let preview = format_preview(&[record("007", None, None)], 10);
        assert!(preview.lines().nth(1).unwrap().contains("<NA>"));
    }

    #[test]
    fn test_preview_of_empty_table_is_header_only() {
        assert_eq!(
            format_preview(&[], 10),
            "Precinct No.  Precinct Name  Active  Inactive"
        );
    }
}
