use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// フォーム入力 1 項目分の検証エラー。Display がそのまま画面表示用のメッセージになる。
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// 必須項目が未入力。値は項目の表示名。
    #[error("{0} is required")]
    Required(String),
    #[error("Please enter a valid email")]
    InvalidEmail(String),
}

/// FieldErrors は項目 ID ごとの検証エラーを保持する。
///
/// 1 項目につき保持するのは最初に追加されたエラーだけ。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<String, ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// field にまだエラーが無ければ追加する。
    pub fn add(&mut self, field: impl Into<String>, error: ValidationError) {
        self.errors.entry(field.into()).or_insert(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// 項目 ID → 表示メッセージの対応表を返す。
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, err)| (field.clone(), err.to_string()))
            .collect()
    }

    /// エラーが無ければ Ok、あれば自身を Err として返す。
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|(field, err)| format!("{field}: {err}"))
            .collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.messages().serialize(serializer)
    }
}
