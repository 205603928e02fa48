use crate::domain::entity::user_record::UserRecord;

/// search は大文字小文字を区別せず、いずれかの値に term を含むレコードだけを残す。
/// 並び順は変えない。空の term はすべてに一致する。
pub fn search(records: Vec<UserRecord>, term: &str) -> Vec<UserRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| r.contains_lowercase(&needle))
        .collect()
}

/// strip_field はすべてのレコードから column_id の値を取り除き、取り除いた件数を返す。
pub fn strip_field(records: &mut [UserRecord], column_id: &str) -> usize {
    records
        .iter_mut()
        .map(|r| r.strip_field(column_id))
        .filter(|removed| *removed)
        .count()
}

/// status が value のレコード数。
pub fn count_with_status(records: &[UserRecord], value: &str) -> usize {
    records
        .iter()
        .filter(|r| r.get("status").is_some_and(|v| v.as_str() == value))
        .count()
}
