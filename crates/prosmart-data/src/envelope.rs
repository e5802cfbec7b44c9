//! The `{ success, data, message }` response envelope.

use prosmart_catalog::catalog::CategoryTree;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Wrapper every API response uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the API considers the call successful.
    pub success: bool,
    /// Payload, present on success.
    pub data: Option<T>,
    /// Explanation, usually present on failure.
    pub message: Option<String>,
}

/// Payload of `/categories-with-products`.
///
/// The live API nests the tree under `categories`; a bare mapping is
/// accepted too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreePayload {
    /// `{ "categories": { ... } }`.
    Wrapped {
        /// The tree.
        categories: CategoryTree,
    },
    /// `{ "cat_001": { ... }, ... }`.
    Bare(CategoryTree),
}

impl TreePayload {
    /// Unwrap the tree.
    pub fn into_tree(self) -> CategoryTree {
        match self {
            TreePayload::Wrapped { categories } => categories,
            TreePayload::Bare(tree) => tree,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Decode a raw response into its payload.
///
/// - non-2xx status: [`FetchError::Http`], with the envelope message when
///   the body has one
/// - unparseable body or missing `data`: [`FetchError::Malformed`]
/// - `success: false`: [`FetchError::Rejected`]
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, FetchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP error! status: {}", status));
        return Err(FetchError::Http { status, message });
    }

    let envelope: ApiEnvelope<T> = serde_json::from_slice(body)?;
    if !envelope.success {
        return Err(FetchError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "Request was not successful".to_string()),
        ));
    }

    envelope
        .data
        .ok_or_else(|| FetchError::Malformed("envelope has no data".to_string()))
}
