use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::entity::column::{Column, FieldType};

/// FieldValue はカラム型に対応したタグ付きの値。
///
/// 保存形式はただの JSON 文字列で、タグは読み込み後にカラム定義から付け直す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Email(String),
    Date(String),
    Choice(String),
    MultilineText(String),
}

impl FieldValue {
    pub fn typed(field_type: FieldType, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match field_type {
            FieldType::Text => Self::Text(raw),
            FieldType::Email => Self::Email(raw),
            FieldType::Date => Self::Date(raw),
            FieldType::Select => Self::Choice(raw),
            FieldType::Textarea => Self::MultilineText(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(v)
            | Self::Email(v)
            | Self::Date(v)
            | Self::Choice(v)
            | Self::MultilineText(v) => v,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Text(v)
            | Self::Email(v)
            | Self::Date(v)
            | Self::Choice(v)
            | Self::MultilineText(v) => v,
        }
    }

    /// 値はそのままにタグだけを field_type に合わせる。
    #[must_use]
    pub fn retyped(self, field_type: FieldType) -> Self {
        Self::typed(field_type, self.into_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 旧いドキュメントには数値や真偽値が入っていることがあるため、スカラー値は文字列に読み替える。
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredScalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null(()),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match StoredScalar::deserialize(deserializer)? {
            StoredScalar::Str(s) => s,
            StoredScalar::Int(n) => n.to_string(),
            StoredScalar::Float(n) => n.to_string(),
            StoredScalar::Bool(b) => b.to_string(),
            StoredScalar::Null(()) => String::new(),
        };
        Ok(Self::Text(raw))
    }
}

/// UserRecord は管理画面で扱うユーザー 1 件。
///
/// フィールドの形はその時点のカラム定義で決まる。削除されたカラムの値は持たず、
/// 追加されたばかりのカラムの値は明示的に設定されるまで存在しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, fields: BTreeMap<String, FieldValue>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, column_id: &str) -> Option<&FieldValue> {
        self.fields.get(column_id)
    }

    /// ID を含むいずれかの値の小文字表現が needle_lower を含むかどうか。
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        self.id.to_lowercase().contains(needle_lower)
            || self
                .fields
                .values()
                .any(|v| v.as_str().to_lowercase().contains(needle_lower))
    }

    /// column_id の値を取り除く。取り除いた場合は true。
    pub fn strip_field(&mut self, column_id: &str) -> bool {
        self.fields.remove(column_id).is_some()
    }

    /// 値のタグを現在のカラム定義に合わせる。定義に無いキーは Text のまま残す。
    pub fn conform(&mut self, columns: &[Column]) {
        for column in columns {
            if let Some(value) = self.fields.remove(&column.id) {
                self.fields
                    .insert(column.id.clone(), value.retyped(column.field_type));
            }
        }
    }
}
