use std::collections::BTreeMap;

use forgefit_validation::{validate_email, validate_required, FieldErrors};

use crate::domain::entity::column::{Column, FieldType};
use crate::domain::entity::user_record::FieldValue;

/// FormValues は送信されたフォームの値。キーはカラム ID。
pub type FormValues = BTreeMap<String, String>;

/// validate_record はカラム定義に従ってフォームの値を検証し、項目ごとのエラーを返す。
///
/// - 必須項目が未入力（空白のみを含む）: `"<表示名> is required"`
/// - email 型で空でない値がメール形式でない: `"Please enter a valid email"`
///
/// 1 項目につきエラーは 1 つまでで、必須チェックが優先される。
pub fn validate_record(columns: &[Column], values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for column in columns {
        let value = values.get(&column.id).map(String::as_str);
        if column.required {
            if let Err(e) = validate_required(value, &column.name) {
                errors.add(column.id.clone(), e);
                continue;
            }
        }
        if column.field_type == FieldType::Email {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                if let Err(e) = validate_email(v) {
                    errors.add(column.id.clone(), e);
                }
            }
        }
    }
    errors
}

/// build_fields はフォームの値からレコードのフィールドを組み立てる。
/// カラム定義に無いキーの値は捨てる。
pub fn build_fields(columns: &[Column], values: &FormValues) -> BTreeMap<String, FieldValue> {
    columns
        .iter()
        .filter_map(|column| {
            values
                .get(&column.id)
                .map(|v| (column.id.clone(), FieldValue::typed(column.field_type, v.clone())))
        })
        .collect()
}
