use serde::{Deserialize, Serialize};
use std::fmt;

/// 初回ロード時に投入され、削除・型変更・必須変更ができない既定カラムの ID。
pub const DEFAULT_COLUMN_IDS: [&str; 4] = ["name", "email", "datePurchased", "status"];

pub const NEW_COLUMN_NAME: &str = "New Column";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Date,
    Select,
    Textarea,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Email => write!(f, "email"),
            Self::Date => write!(f, "date"),
            Self::Select => write!(f, "select"),
            Self::Textarea => write!(f, "textarea"),
        }
    }
}

/// Column はユーザー一覧に表示する 1 項目の定義。並び順がそのまま一覧の列順になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    /// select 型のときだけ存在する選択肢。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Column {
    pub fn is_default(&self) -> bool {
        is_default_column_id(&self.id)
    }

    /// 既定の 4 カラムを返す。
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column {
                id: "name".to_string(),
                name: "Name".to_string(),
                field_type: FieldType::Text,
                required: true,
                options: None,
            },
            Column {
                id: "email".to_string(),
                name: "Email".to_string(),
                field_type: FieldType::Email,
                required: true,
                options: None,
            },
            Column {
                id: "datePurchased".to_string(),
                name: "Date Purchased".to_string(),
                field_type: FieldType::Date,
                required: true,
                options: None,
            },
            Column {
                id: "status".to_string(),
                name: "Status".to_string(),
                field_type: FieldType::Select,
                required: true,
                options: Some(vec![
                    "Active".to_string(),
                    "Inactive".to_string(),
                    "Pending".to_string(),
                ]),
            },
        ]
    }

    /// patch を取り込んだ新しい定義を返す。ID は変わらない。
    pub fn merged(&self, patch: &ColumnPatch) -> Column {
        let mut next = self.clone();
        if let Some(ref name) = patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(field_type) = patch.field_type {
            next.field_type = field_type;
        }
        if let Some(required) = patch.required {
            next.required = required;
        }
        if let Some(ref options) = patch.options {
            next.options = Some(options.to_list());
        }
        next.normalize_options();
        next
    }

    /// select 以外では選択肢を持たず、select では必ず選択肢リストを持つようにする。
    pub fn normalize_options(&mut self) {
        if self.field_type == FieldType::Select {
            self.options.get_or_insert_with(Vec::new);
        } else {
            self.options = None;
        }
    }

    /// 追加フォームの初期値。select は先頭の選択肢、それ以外は空文字列。
    pub fn initial_value(&self) -> String {
        match (self.field_type, &self.options) {
            (FieldType::Select, Some(options)) => options.first().cloned().unwrap_or_default(),
            _ => String::new(),
        }
    }
}

pub fn is_default_column_id(id: &str) -> bool {
    DEFAULT_COLUMN_IDS.contains(&id)
}

/// parse_options はカンマ区切りの文字列を選択肢リストに変換する。
/// 前後の空白を除き、空要素は捨てる。重複はそのまま残す。
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// 選択肢の入力。カンマ区切り文字列と配列のどちらも受け付ける。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionsInput {
    Csv(String),
    List(Vec<String>),
}

impl OptionsInput {
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Csv(raw) => parse_options(raw),
            Self::List(items) => items
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewColumn {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub options: Option<OptionsInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub options: Option<OptionsInput>,
}

impl ColumnPatch {
    /// 既定カラムに対して許可されない変更（型・必須）を含むかどうか。
    /// 現在値と同じ値の指定は変更とみなさない。
    pub fn changes_protected_attributes(&self, current: &Column) -> bool {
        self.field_type.is_some_and(|t| t != current.field_type)
            || self.required.is_some_and(|r| r != current.required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(field_type: FieldType) -> Column {
        Column {
            id: "c1".to_string(),
            name: "Notes".to_string(),
            field_type,
            required: false,
            options: None,
        }
    }

    #[test]
    fn test_default_columns_are_marked_default() {
        let defaults = Column::default_columns();
        assert_eq!(defaults.len(), 4);
        assert!(defaults.iter().all(Column::is_default));
        assert_eq!(
            defaults.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            DEFAULT_COLUMN_IDS.to_vec()
        );
    }

    #[test]
    fn test_parse_options_trims_and_keeps_duplicates() {
        assert_eq!(
            parse_options(" Gold, Silver ,,Gold , "),
            vec!["Gold", "Silver", "Gold"]
        );
        assert!(parse_options("").is_empty());
    }

    #[test]
    fn test_serialization_matches_stored_shape() {
        let json = serde_json::to_value(&Column::default_columns()[3]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "status",
                "name": "Status",
                "type": "select",
                "required": true,
                "options": ["Active", "Inactive", "Pending"],
            })
        );
        let text = serde_json::to_value(&Column::default_columns()[0]).unwrap();
        assert!(text.get("options").is_none());
    }

    #[test]
    fn test_merged_to_select_parses_options() {
        let col = column(FieldType::Text);
        let patch = ColumnPatch {
            field_type: Some(FieldType::Select),
            options: Some(OptionsInput::Csv("Gold, Silver".to_string())),
            ..Default::default()
        };
        let merged = col.merged(&patch);
        assert_eq!(merged.field_type, FieldType::Select);
        assert_eq!(merged.options, Some(vec!["Gold".to_string(), "Silver".to_string()]));
        assert_eq!(merged.id, "c1");
    }

    #[test]
    fn test_merged_away_from_select_drops_options() {
        let mut col = column(FieldType::Select);
        col.options = Some(vec!["A".to_string()]);
        let merged = col.merged(&ColumnPatch {
            field_type: Some(FieldType::Textarea),
            ..Default::default()
        });
        assert_eq!(merged.options, None);
    }

    #[test]
    fn test_changes_protected_attributes() {
        let email = Column::default_columns()[1].clone();
        let rename = ColumnPatch {
            name: Some("E-mail".to_string()),
            ..Default::default()
        };
        assert!(!rename.changes_protected_attributes(&email));

        let same_type = ColumnPatch {
            field_type: Some(FieldType::Email),
            required: Some(true),
            ..Default::default()
        };
        assert!(!same_type.changes_protected_attributes(&email));

        let retype = ColumnPatch {
            field_type: Some(FieldType::Text),
            ..Default::default()
        };
        assert!(retype.changes_protected_attributes(&email));
    }

    #[test]
    fn test_initial_value() {
        let status = Column::default_columns()[3].clone();
        assert_eq!(status.initial_value(), "Active");
        assert_eq!(column(FieldType::Date).initial_value(), "");
    }

    #[test]
    fn test_options_input_accepts_list_and_csv() {
        let list: OptionsInput = serde_json::from_str(r#"["a", " ", "b"]"#).unwrap();
        assert_eq!(list.to_list(), vec!["a", "b"]);
        let csv: OptionsInput = serde_json::from_str(r#""a,b""#).unwrap();
        assert_eq!(csv.to_list(), vec!["a", "b"]);
    }
}
