//! Response envelope decoding
//!
//! Backend endpoints disagree on how they wrap payloads. Seen in the wild:
//!
//! * `{ "success": true, "data": [...] }`
//! * `{ "isSuccess": true, "data": {...} }`
//! * `{ "success": true, "users": [...] }` (resource-named key)
//! * a bare array or object with no wrapper at all
//!
//! Paged endpoints additionally carry `totalCount`, `totalPages` and
//! `currentPage` next to the payload.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{types::Page, Error, Result};

const SUCCESS_KEYS: [&str; 2] = ["success", "isSuccess"];

/// A response body split into its status flag, message and payload
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Value of `success`/`isSuccess`, `None` for bare bodies
    pub success: Option<bool>,
    /// Backend message, if any
    pub message: Option<String>,
    /// The payload itself
    pub payload: Value,
    /// `totalCount` when present
    pub total_count: Option<u64>,
    /// `totalPages` when present
    pub total_pages: Option<u32>,
    /// `currentPage` when present
    pub current_page: Option<u32>,
}

impl Envelope {
    /// Split a response body
    ///
    /// `keys` lists resource-named payload keys tried after `data`. A body
    /// without a success flag is its own payload unless one of those keys
    /// is present.
    pub fn split(body: Value, keys: &[&str]) -> Self {
        let Value::Object(mut map) = body else {
            return Self::bare(body);
        };

        let success = SUCCESS_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_bool));
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let total_count = map.get("totalCount").and_then(Value::as_u64);
        let total_pages = read_u32(&map, "totalPages");
        let current_page = read_u32(&map, "currentPage");

        let payload_key = std::iter::once("data")
            .chain(keys.iter().copied())
            .find(|key| map.get(*key).is_some_and(|v| !v.is_null()));

        let payload = match (payload_key, success) {
            (Some(key), _) => map.remove(key).unwrap_or(Value::Null),
            (None, Some(_)) => Value::Null,
            (None, None) => Value::Object(map),
        };

        Self {
            success,
            message,
            payload,
            total_count,
            total_pages,
            current_page,
        }
    }

    fn bare(payload: Value) -> Self {
        Self {
            success: None,
            message: None,
            payload,
            total_count: None,
            total_pages: None,
            current_page: None,
        }
    }

    /// Fail with the backend message when the flag is `false`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for `success: false`.
    pub fn into_checked(self) -> Result<Self> {
        if self.success == Some(false) {
            return Err(Error::api(
                self.message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        Ok(self)
    }

    /// Deserialize the payload
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] when the payload has the wrong
    /// shape.
    pub fn payload<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.payload)
            .map_err(|e| Error::UnexpectedResponse(format!("payload did not match: {e}")))
    }

    /// Deserialize a list payload into a page using the paging fields
    ///
    /// Missing paging fields are derived from the requested page and the
    /// number of items received.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedResponse`] when the payload is not a list
    /// of `T`.
    pub fn into_page<T: DeserializeOwned>(self, page: u32, page_size: u32) -> Result<Page<T>> {
        let total_count = self.total_count;
        let total_pages = self.total_pages;
        let current_page = self.current_page;
        let items: Vec<T> = self.payload()?;

        let total_count = total_count.unwrap_or(items.len() as u64);
        let total_pages = total_pages.unwrap_or_else(|| {
            u32::try_from(total_count.div_ceil(u64::from(page_size.max(1)))).unwrap_or(u32::MAX)
        });

        Ok(Page {
            items,
            current_page: current_page.unwrap_or(page).max(1),
            total_pages: total_pages.max(1),
            total_count,
        })
    }
}

fn read_u32(map: &Map<String, Value>, key: &str) -> Option<u32> {
    map.get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Check the flag and deserialize the payload in one step
///
/// # Errors
///
/// Returns [`Error::Api`] for `success: false` or
/// [`Error::UnexpectedResponse`] for a payload of the wrong shape.
pub fn decode<T: DeserializeOwned>(body: Value, keys: &[&str]) -> Result<T> {
    Envelope::split(body, keys).into_checked()?.payload()
}

/// Check the flag of a mutation response whose payload is not needed
///
/// # Errors
///
/// Returns [`Error::Api`] for `success: false`.
pub fn check(body: Value) -> Result<Option<String>> {
    Envelope::split(body, &[]).into_checked().map(|e| e.message)
}
