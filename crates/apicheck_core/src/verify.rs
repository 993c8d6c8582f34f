//! Response verification contracts.
//!
//! Every check is a pure function over an [`ApiResponse`] so the same
//! contract can be reused by scenarios that differ only in their inputs.

use crate::error::{HarnessError, Result};
use crate::transport::ApiResponse;
use crate::types::NewPost;
use serde_json::Value;
use std::collections::BTreeSet;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Checks the status, classifying a mismatch via [`HarnessError::from_status`].
pub fn expect_status(resp: &ApiResponse, expected: u16, path: &str) -> Result<()> {
    if resp.status == expected {
        Ok(())
    } else {
        Err(HarnessError::from_status(expected, resp.status, path))
    }
}

/// Checks that the content type announces JSON.
pub fn expect_json(resp: &ApiResponse) -> Result<()> {
    expect_content_type(resp, JSON_MEDIA_TYPE)
}

pub fn expect_content_type(resp: &ApiResponse, fragment: &str) -> Result<()> {
    match resp.content_type() {
        Some(ct) if ct.contains(fragment) => Ok(()),
        other => Err(HarnessError::AssertionFailure(format!(
            "content type {:?} does not include {:?}",
            other, fragment
        ))),
    }
}

fn as_array(resp: &ApiResponse) -> Result<&Vec<Value>> {
    resp.body.as_array().ok_or_else(|| {
        HarnessError::AssertionFailure(format!("expected a JSON array, got {}", resp.body))
    })
}

/// Checks that the body is an array of exactly `len` entries.
pub fn expect_len(resp: &ApiResponse, len: usize) -> Result<()> {
    let items = as_array(resp)?;
    if items.len() == len {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailure(format!(
            "expected {} entries, got {}",
            len,
            items.len()
        )))
    }
}

/// Ids of every array entry, in response order.
pub fn ids_of(resp: &ApiResponse) -> Result<Vec<u64>> {
    as_array(resp)?
        .iter()
        .map(|item| {
            item.get("id").and_then(Value::as_u64).ok_or_else(|| {
                HarnessError::AssertionFailure(format!("entry without integer id: {}", item))
            })
        })
        .collect()
}

/// Checks that the body holds exactly the requested ids, in any order.
///
/// Duplicates in `ids` are collapsed: the expected length is the number of
/// distinct ids.
pub fn expect_ids(resp: &ApiResponse, ids: &[u64]) -> Result<()> {
    let wanted: BTreeSet<u64> = ids.iter().copied().collect();
    expect_len(resp, wanted.len())?;

    let returned: BTreeSet<u64> = ids_of(resp)?.into_iter().collect();
    let missing: Vec<u64> = wanted.difference(&returned).copied().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailure(format!(
            "ids {:?} missing from response (got {:?})",
            missing, returned
        )))
    }
}

/// Checks that the body is an object containing every field of `expected`.
pub fn expect_includes(resp: &ApiResponse, expected: &Value) -> Result<()> {
    let (Some(actual), Some(expected)) = (resp.body.as_object(), expected.as_object()) else {
        return Err(HarnessError::AssertionFailure(format!(
            "expected an object including {}, got {}",
            expected, resp.body
        )));
    };
    for (key, value) in expected {
        if actual.get(key) != Some(value) {
            return Err(HarnessError::AssertionFailure(format!(
                "field {:?}: expected {}, got {}",
                key,
                value,
                actual.get(key).unwrap_or(&Value::Null)
            )));
        }
    }
    Ok(())
}

/// Checks that the body is `post` plus a positive server-assigned id.
///
/// Returns that id.
pub fn expect_post_fields(resp: &ApiResponse, post: &NewPost) -> Result<u64> {
    let id = resp
        .body
        .get("id")
        .and_then(Value::as_u64)
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            HarnessError::AssertionFailure(format!("no positive id in {}", resp.body))
        })?;
    let fields =
        serde_json::to_value(post).map_err(|e| HarnessError::Decode(e.to_string()))?;
    expect_includes(resp, &fields)?;
    Ok(id)
}

/// Checks that no entry of a list carries `title`.
pub fn expect_list_excludes_title(resp: &ApiResponse, title: &str) -> Result<()> {
    let hit = as_array(resp)?
        .iter()
        .find(|item| item.get("title").and_then(Value::as_str) == Some(title));
    match hit {
        Some(item) => Err(HarnessError::AssertionFailure(format!(
            "unexpected entry with title {:?}: {}",
            title, item
        ))),
        None => Ok(()),
    }
}

// ===== Contracts =====

/// `GET /posts`: 200 with a JSON content type.
pub fn list_all_contract(resp: &ApiResponse, path: &str) -> Result<()> {
    expect_status(resp, 200, path)?;
    expect_json(resp)
}

/// `GET /posts?_limit=n`: 200 with exactly `n` entries.
pub fn list_limited_contract(resp: &ApiResponse, limit: usize, path: &str) -> Result<()> {
    expect_status(resp, 200, path)?;
    expect_len(resp, limit)
}

/// `GET /posts?id=..`: 200 with exactly the distinct requested ids.
pub fn list_by_ids_contract(resp: &ApiResponse, ids: &[u64], path: &str) -> Result<()> {
    expect_status(resp, 200, path)?;
    expect_ids(resp, ids)
}

/// `POST /posts`: 201 echoing the submitted fields plus an id.
pub fn created_contract(resp: &ApiResponse, post: &NewPost, path: &str) -> Result<u64> {
    expect_status(resp, 201, path)?;
    expect_post_fields(resp, post)
}

/// `PUT /posts/{id}`: 200 reflecting the new field values.
pub fn updated_contract(resp: &ApiResponse, post: &NewPost, path: &str) -> Result<u64> {
    expect_status(resp, 200, path)?;
    expect_post_fields(resp, post)
}
