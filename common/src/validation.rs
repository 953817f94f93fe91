//! 保存・送信ボタンの有効判定

use crate::types::{Field, FieldValue};

/// 項目が1つ以上あり、必須項目がすべて埋まっていればtrue
pub fn is_ready(fields: &[Field], values: &[Option<FieldValue>]) -> bool {
    !fields.is_empty()
        && fields.iter().enumerate().all(|(index, field)| {
            !field.is_required
                || values
                    .get(index)
                    .and_then(|value| value.as_ref())
                    .is_some_and(FieldValue::is_filled)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn test_empty_fields_not_ready() {
        assert!(!is_ready(&[], &[]));
    }

    #[test]
    fn test_required_field() {
        let fields = vec![Field::new("a", FieldType::String).required()];

        assert!(!is_ready(&fields, &[None]));
        assert!(!is_ready(&fields, &[Some(FieldValue::Text(String::new()))]));
        assert!(is_ready(&fields, &[Some(FieldValue::Text("x".into()))]));
    }

    #[test]
    fn test_optional_fields_do_not_gate() {
        let fields = vec![
            Field::new("a", FieldType::String).required(),
            Field::new("b", FieldType::Number),
        ];
        assert!(is_ready(&fields, &[Some(FieldValue::Text("x".into())), None]));
    }

    #[test]
    fn test_short_values_slice() {
        let fields = vec![
            Field::new("a", FieldType::String),
            Field::new("b", FieldType::Image).required(),
        ];
        assert!(!is_ready(&fields, &[None]));
    }
}
