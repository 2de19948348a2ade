//! Strict decoding of request bodies and query strings.
//!
//! Actix's `Json` and `Query` extractors reject malformed input with plain
//! text responses; these helpers keep the JSON error shape instead.

use std::collections::BTreeMap;

use actix_web::web::{self, Bytes};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::Error;

/// Decode a JSON body into `T`.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request("request body must be valid JSON")
            .with_details(json!({ "field": "body", "code": "malformed_json", "reason": err.to_string() }))
    })
}

/// Decode a query string into its key/value pairs. Repeated keys keep the
/// last value.
pub(crate) fn decode_query(raw: &str) -> Result<BTreeMap<String, String>, Error> {
    web::Query::<Vec<(String, String)>>::from_query(raw)
        .map(|pairs| pairs.into_inner().into_iter().collect())
        .map_err(|err| {
            Error::invalid_request("query string is malformed")
                .with_details(json!({ "field": "query", "code": "malformed_query", "reason": err.to_string() }))
        })
}
