//! Wire types shared between the roster server and client.

use serde::{Deserialize, Serialize};

/// A single user record.
///
/// The paging and rendering layers treat this as an opaque payload; only its
/// count and position matter to them. Fields mirror the `users.json` dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Company,
    pub address: Address,
}

/// Company affiliation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// Postal address of a user. Only the city is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
}

/// One page of the user list, as served by `GET /api/v1/fetchUsers`.
///
/// `total_pages` is a pure function of the dataset size and the requested
/// limit, so it is stable across calls for a fixed limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_users: u64,
    pub users: Vec<User>,
}

/// Error body returned by the server on failure (`500 {"message"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl User {
    /// Builds a synthetic user, used by tests and the sample-data generator.
    pub fn synthetic(id: u64) -> Self {
        Self {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            phone: format!("1-555-{:03}-{:04}", id % 1000, id % 10000),
            company: Company {
                name: format!("Company {}", id % 17),
            },
            address: Address {
                city: format!("City {}", id % 29),
            },
        }
    }
}
