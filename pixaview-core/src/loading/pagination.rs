/// Where the current search session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// 1-based page of the most recently requested fetch.
    pub current_page: u32,
    /// Cleared once a page comes back empty.
    pub has_more_pages: bool,
    /// A page fetch is in flight.
    pub is_loading: bool,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            current_page: 1,
            has_more_pages: true,
            is_loading: false,
        }
    }
}

impl PaginationCursor {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether another page may be requested right now.
    pub fn can_load_more(&self) -> bool {
        !self.is_loading && self.has_more_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_first_page() {
        let mut cursor = PaginationCursor {
            current_page: 7,
            has_more_pages: false,
            is_loading: true,
        };
        assert!(!cursor.can_load_more());

        cursor.reset();
        assert_eq!(cursor, PaginationCursor::default());
        assert_eq!(cursor.current_page, 1);
        assert!(cursor.can_load_more());
    }
}
