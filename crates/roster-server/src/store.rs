//! Page provider: a read-only paged accessor over the static user list.
//!
//! The dataset is loaded once at startup; a read failure there is a startup
//! error. After that, `page` is a pure function of (page, limit): no state,
//! no failure modes, out-of-range pages simply return an empty sequence.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use roster_types::{User, UsersPage};

/// Default page number when the query parameter is missing or malformed.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when the query parameter is missing or malformed.
pub const DEFAULT_LIMIT: u32 = 10;

/// In-memory user list with paged reads.
#[derive(Debug)]
pub struct UserStore {
    users: Vec<User>,
}

impl UserStore {
    /// Loads the dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read user data from {}", path.display()))?;
        let users: Vec<User> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse user data from {}", path.display()))?;
        Ok(Self { users })
    }

    /// Wraps an already-materialized user list.
    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns one page of users.
    ///
    /// `start = (page - 1) * limit`, clamped to the available length;
    /// `total_pages = ceil(total / limit)`. Non-positive inputs are treated
    /// as the defaults rather than rejected.
    pub fn page(&self, page: u32, limit: u32) -> UsersPage {
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };

        let total_users = self.users.len() as u64;
        let total_pages = total_users.div_ceil(u64::from(limit)) as u32;

        let start = (u64::from(page - 1) * u64::from(limit)).min(total_users) as usize;
        let end = (start + limit as usize).min(self.users.len());

        UsersPage {
            current_page: page,
            total_pages,
            total_users,
            users: self.users[start..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(count: u64) -> UserStore {
        UserStore::from_users((0..count).map(User::synthetic).collect())
    }

    #[test]
    fn test_page_slices_with_clamping() {
        let store = store(120);

        let first = store.page(1, 50);
        assert_eq!(first.users.len(), 50);
        assert_eq!(first.users[0].id, 0);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_users, 120);

        // Last page is short but never over-reads.
        let last = store.page(3, 50);
        assert_eq!(last.users.len(), 20);
        assert_eq!(last.users[0].id, 100);
    }

    /// Pages concatenated over 1..=total_pages reproduce the full set with no
    /// gaps or duplicates.
    #[test]
    fn test_pages_concatenate_to_full_set() {
        let store = store(120);
        for limit in [1, 7, 10, 50, 120, 200] {
            let total_pages = store.page(1, limit).total_pages;
            let mut ids = Vec::new();
            for page in 1..=total_pages {
                let chunk = store.page(page, limit);
                assert!(chunk.users.len() <= limit as usize);
                ids.extend(chunk.users.iter().map(|u| u.id));
            }
            assert_eq!(ids, (0..120).collect::<Vec<u64>>(), "limit {limit}");
        }
    }

    /// Out-of-range page returns an empty sequence, not an error.
    #[test]
    fn test_out_of_range_page_is_empty() {
        let store = store(10);
        let page = store.page(5, 10);
        assert!(page.users.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_users, 10);
        assert_eq!(page.current_page, 5);
    }

    /// total_pages is stable across calls for a fixed limit.
    #[test]
    fn test_total_pages_stable() {
        let store = store(101);
        let a = store.page(1, 10).total_pages;
        let b = store.page(9, 10).total_pages;
        assert_eq!(a, 11);
        assert_eq!(a, b);
    }

    /// Zero inputs fall back to the defaults instead of panicking.
    #[test]
    fn test_zero_inputs_use_defaults() {
        let store = store(25);
        let page = store.page(0, 0);
        assert_eq!(page.current_page, DEFAULT_PAGE);
        assert_eq!(page.users.len(), DEFAULT_LIMIT as usize);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_store() {
        let store = store(0);
        let page = store.page(1, 10);
        assert!(page.users.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_users, 0);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(UserStore::load(&path).is_err());
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let users: Vec<User> = (0..3).map(User::synthetic).collect();
        fs::write(&path, serde_json::to_string(&users).unwrap()).unwrap();

        let store = UserStore::load(&path).unwrap();
        assert_eq!(store.len(), 3);
    }
}
