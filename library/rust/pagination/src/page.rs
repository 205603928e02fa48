use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// 1 ページあたりの件数の上限。
pub const MAX_PER_PAGE: u32 = 100;

/// PageRequest は 1 始まりのページ番号とページサイズを表す。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// 値を検証して PageRequest を作成する。
    pub fn new(page: u32, per_page: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::InvalidPage(page));
        }
        validate_per_page(per_page)?;
        Ok(Self { page, per_page })
    }

    /// 先頭から読み飛ばす件数。
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.per_page as usize)
    }
}

pub fn validate_per_page(per_page: u32) -> Result<(), PaginationError> {
    if per_page < 1 || per_page > MAX_PER_PAGE {
        return Err(PaginationError::InvalidPerPage {
            got: per_page,
            max: MAX_PER_PAGE,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        let total_pages = if request.per_page == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(request.per_page))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
            total_pages,
        }
    }

    /// 表示中の範囲を 1 始まりの (先頭, 末尾) で返す。空ページなら None。
    ///
    /// 一覧画面の「Showing X to Y of Z」表示に使う。
    pub fn showing_range(&self) -> Option<(u64, u64)> {
        if self.items.is_empty() {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page) + 1;
        let end = (start + self.items.len() as u64 - 1).min(self.total);
        Some((start, end))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// paginate は並び順を変えずに items から request のページを切り出す。
/// 最終ページを超えたページは空になる。
pub fn paginate<T>(items: Vec<T>, request: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let window: Vec<T> = items
        .into_iter()
        .skip(request.offset())
        .take(request.per_page as usize)
        .collect();
    PageResponse::new(window, total, request)
}
