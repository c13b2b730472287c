/// Pagination query parameters (1-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    /// Normalizes raw values: page ≥ 1, limit within 1..=100.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * self.limit as u64
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Paginated response wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_clamped() {
        let p = PaginationParams::new(Some(0), Some(1000));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 100);

        let p = PaginationParams::new(None, Some(0));
        assert_eq!(p.limit, 1);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PaginationParams::new(Some(1), Some(20)).offset(), 0);
        assert_eq!(PaginationParams::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn total_pages_rounds_up() {
        let r: PaginatedResult<u8> = PaginatedResult::new(vec![], 41, 1, 20);
        assert_eq!(r.total_pages, 3);
        let r: PaginatedResult<u8> = PaginatedResult::new(vec![], 0, 1, 20);
        assert_eq!(r.total_pages, 0);
    }
}
