//! 項目管理
//!
//! 追加・削除・JSONでの入出力。名前を省略した追加は対話入力になる。

use crate::error::{DejapawError, Result};
use dejapaw_common::{Field, FieldType, StoreData};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_FILE: &str = "fields.json";

/// コマンドラインで指定された追加項目
pub struct NewField {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub optional: bool,
    pub default: Option<String>,
}

impl NewField {
    /// 名前があれば引数から、無ければ対話入力で作る
    pub fn into_field(self) -> Result<Field> {
        match self.name {
            Some(name) => Ok(build_field(
                &name,
                self.field_type.unwrap_or(FieldType::String),
                !self.optional,
                self.default.as_deref(),
            )),
            None => prompt_field(),
        }
    }
}

/// 空の既定値は持たせない
pub fn build_field(name: &str, field_type: FieldType, required: bool, default: Option<&str>) -> Field {
    let mut field = Field::new(name.trim(), field_type);
    if required {
        field = field.required();
    }
    if let Some(default) = default.filter(|d| !d.is_empty()) {
        field = field.with_default(default);
    }
    field
}

pub fn add(store: &mut StoreData, field: Field) -> Result<()> {
    store.add_field(field)?;
    Ok(())
}

pub fn remove(store: &mut StoreData, index: usize) -> Result<Field> {
    Ok(store.remove_field(index)?)
}

/// 項目リストをファイルの内容で置き換える
pub fn import(store: &mut StoreData, path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)?;
    Ok(store.import_fields(&content)?)
}

pub fn export(fields: &[Field], path: Option<&Path>) -> Result<PathBuf> {
    let output = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    let json = serde_json::to_string_pretty(fields)?;
    std::fs::write(&output, json)?;
    Ok(output)
}

/// `#  名前  種別  既定値` の一覧
pub fn render_fields(fields: &[Field]) -> String {
    let labels: Vec<String> = fields.iter().map(Field::label).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    fields
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(index, (field, label))| {
            let mut line = format!(
                "{:>3}  {:<width$}  {:<9}",
                index,
                label,
                field.field_type.as_str(),
                width = width
            );
            if let Some(default) = field.default_value() {
                line.push_str(&format!("  (既定値: {})", default));
            }
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn prompt_field() -> Result<Field> {
    let name: String = Input::new()
        .with_prompt("項目名")
        .interact_text()
        .map_err(prompt_error)?;

    let types: Vec<&str> = FieldType::ALL.iter().map(FieldType::as_str).collect();
    let selected = Select::new()
        .with_prompt("種別")
        .items(&types)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    let required = Confirm::new()
        .with_prompt("必須項目にしますか？")
        .default(true)
        .interact()
        .map_err(prompt_error)?;

    let default: String = Input::new()
        .with_prompt("既定値（空欄可）")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)?;

    let field_type = FieldType::ALL
        .get(selected)
        .copied()
        .unwrap_or(FieldType::String);
    Ok(build_field(&name, field_type, required, Some(&default)))
}

fn prompt_error(e: dialoguer::Error) -> DejapawError {
    DejapawError::Prompt(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_field_from_args() {
        let field = build_field(" price ", FieldType::Number, true, Some(""));
        assert_eq!(field.name, "price");
        assert!(field.is_required);
        assert_eq!(field.default_value(), None);

        let field = build_field("page", FieldType::Url, false, Some("https://example.com"));
        assert!(!field.is_required);
        assert_eq!(field.default_value(), Some("https://example.com"));
    }

    #[test]
    fn test_new_field_defaults_to_string() {
        let field = NewField {
            name: Some("title".into()),
            field_type: None,
            optional: false,
            default: None,
        }
        .into_field()
        .unwrap();
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.is_required);
    }

    #[test]
    fn test_render_fields() {
        let fields = vec![
            Field::new("title", FieldType::String).required(),
            Field::new("qty", FieldType::Number).with_default("1"),
        ];
        let rendered = render_fields(&fields);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  0  title*"));
        assert!(lines[0].contains("string"));
        assert!(lines[1].contains("number"));
        assert!(lines[1].ends_with("(既定値: 1)"));
    }
}
