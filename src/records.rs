//! 保存済みレコードの表示と出力

use crate::error::Result;
use chrono::NaiveDate;
use dejapaw_common::{Field, Record, StoreData};
use std::path::{Path, PathBuf};

/// 列は設定中の項目名。値が無いセルは `-`
pub fn render_table(fields: &[Field], records: &[Record]) -> String {
    let mut header = vec!["#".to_string()];
    header.extend(fields.iter().map(|f| f.name.clone()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut row = vec![index.to_string()];
            row.extend(fields.iter().map(|f| record.display_value(&f.name)));
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(&rows)
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    std::iter::once(&header)
        .chain(&rows)
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `records-20260118.json`
pub fn default_export_name(date: NaiveDate) -> String {
    format!("records-{}.json", date.format("%Y%m%d"))
}

pub fn export(store: &StoreData, path: Option<&Path>) -> Result<PathBuf> {
    let output = path.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(default_export_name(chrono::Local::now().date_naive()))
    });
    std::fs::write(&output, store.records_json()?)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dejapaw_common::FieldType;

    #[test]
    fn test_render_table_columns_follow_fields() {
        let fields = vec![
            Field::new("title", FieldType::String),
            Field::new("price", FieldType::Number),
        ];
        let store = StoreData::from_json(
            r#"{"records": [{"title": "Book", "price": 1200}, {"price": 5}]}"#,
        )
        .unwrap();

        let table = render_table(&fields, &store.records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "# | title | price");
        assert_eq!(lines[1], "0 | Book  | 1200");
        assert_eq!(lines[2], "1 | -     | 5");
    }

    #[test]
    fn test_default_export_name() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        assert_eq!(default_export_name(date), "records-20260118.json");
    }
}
