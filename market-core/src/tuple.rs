use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding::{decode_json_array, encode_json_array};
use crate::error::PayloadError;

/// Identifies one market snapshot: a region, a realm within it, and the
/// snapshot timestamp.
///
/// On the wire the timestamp is integer unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct RegionRealmTimestampTuple {
    /// Geographic server region, e.g. `"us"`.
    pub region_name: String,
    /// Realm slug within the region, e.g. `"earthen-ring"`.
    pub realm_slug: String,
    /// Timestamp of the snapshot to recompute.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub target_timestamp: DateTime<Utc>,
}

impl RegionRealmTimestampTuple {
    /// Create a new tuple.
    pub fn new(
        region_name: impl Into<String>,
        realm_slug: impl Into<String>,
        target_timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            region_name: region_name.into(),
            realm_slug: realm_slug.into(),
            target_timestamp,
        }
    }

    fn validate(&self, index: usize) -> Result<(), PayloadError> {
        if self.region_name.trim().is_empty() {
            return Err(PayloadError::InvalidTuple {
                index,
                reason: "region_name must not be empty".to_owned(),
            });
        }
        if self.realm_slug.trim().is_empty() {
            return Err(PayloadError::InvalidTuple {
                index,
                reason: "realm_slug must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

/// Decode a request body into region/realm/timestamp tuples.
///
/// All-or-nothing: a single invalid element rejects the whole body.
///
/// # Errors
/// Returns a [`PayloadError`] if the body is blank, badly encoded, not an
/// array of tuples, or contains a tuple with an empty region or realm.
pub fn decode_tuples(body: &[u8]) -> Result<Vec<RegionRealmTimestampTuple>, PayloadError> {
    let tuples: Vec<RegionRealmTimestampTuple> = decode_json_array(body)?;
    for (index, tuple) in tuples.iter().enumerate() {
        tuple.validate(index)?;
    }
    Ok(tuples)
}

/// Encode tuples as the JSON text [`decode_tuples`] accepts.
///
/// # Errors
/// Returns [`PayloadError::Encode`] if serialization fails.
pub fn encode_tuples(tuples: &[RegionRealmTimestampTuple]) -> Result<String, PayloadError> {
    encode_json_array(tuples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        match DateTime::from_timestamp(secs, 0) {
            Some(t) => t,
            None => panic!("timestamp {secs} out of range"),
        }
    }

    #[test]
    fn decode_tuples_reads_wire_fields() {
        let body =
            br#"[{"region_name":"us","realm_slug":"earthen-ring","target_timestamp":1554768000}]"#;
        let tuples = match decode_tuples(body) {
            Ok(t) => t,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0].region_name, "us");
        assert_eq!(tuples[0].realm_slug, "earthen-ring");
        assert_eq!(tuples[0].target_timestamp, ts(1_554_768_000));
    }

    #[test]
    fn decode_tuples_empty_array_is_empty_sequence() {
        let tuples = match decode_tuples(b"[]") {
            Ok(t) => t,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert!(tuples.is_empty());
    }

    #[test]
    fn decode_tuples_rejects_missing_field() {
        let body = br#"[{"region_name":"us","realm_slug":"earthen-ring"}]"#;
        assert!(matches!(decode_tuples(body), Err(PayloadError::Json(_))));
    }

    #[test]
    fn decode_tuples_rejects_unknown_field() {
        let body = br#"[{"region_name":"us","realm_slug":"a","target_timestamp":1,"extra":true}]"#;
        assert!(matches!(decode_tuples(body), Err(PayloadError::Json(_))));
    }

    #[test]
    fn decode_tuples_rejects_string_timestamp() {
        let body = br#"[{"region_name":"us","realm_slug":"a","target_timestamp":"yesterday"}]"#;
        assert!(matches!(decode_tuples(body), Err(PayloadError::Json(_))));
    }

    #[test]
    fn decode_tuples_one_bad_element_rejects_all() {
        let body = br#"[
            {"region_name":"us","realm_slug":"a","target_timestamp":1},
            {"region_name":"eu","realm_slug":"","target_timestamp":2}
        ]"#;
        match decode_tuples(body) {
            Err(PayloadError::InvalidTuple { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("realm_slug"), "reason should name the field: {reason}");
            }
            other => panic!("expected InvalidTuple, got {other:?}"),
        }
    }

    #[test]
    fn decode_tuples_rejects_blank_region() {
        let body = br#"[{"region_name":"  ","realm_slug":"a","target_timestamp":1}]"#;
        assert!(matches!(
            decode_tuples(body),
            Err(PayloadError::InvalidTuple { index: 0, .. })
        ));
    }

    #[test]
    fn decode_tuples_accepts_encoded_output() {
        let tuples = vec![
            RegionRealmTimestampTuple::new("us", "earthen-ring", ts(100)),
            RegionRealmTimestampTuple::new("eu", "silvermoon", ts(200)),
        ];
        let encoded = match encode_tuples(&tuples) {
            Ok(s) => s,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert!(encoded.contains("\"target_timestamp\":100"), "timestamp must be unix seconds");
        let decoded = match decode_tuples(encoded.as_bytes()) {
            Ok(t) => t,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(decoded, tuples);
    }
}
