//! Event payload decoding.
//!
//! The periodic namespace emits a bare number per event; the streaming namespace emits batches
//! of sample records shaped like `[{"hrtime": {...}, "value": 0.0023}, ...]`. A batch decodes to
//! its newest record, which is the reading worth showing.

use super::Sample;
use crate::error::{AmpviewError, Result};
use serde_json::Value;

/// Decode one event payload into a sample.
///
/// Accepted shapes: a JSON number, a string holding a number, an object with a numeric `value`
/// field, or a non-empty array of these, of which the last element is taken.
pub fn decode_payload(payload: &Value) -> Result<Sample> {
    let amps = extract_amps(payload).ok_or_else(|| AmpviewError::malformed(payload.to_string()))?;
    Sample::new(amps)
}

fn extract_amps(payload: &Value) -> Option<f64> {
    match payload {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        Value::Object(record) => record.get("value").and_then(scalar_amps),
        Value::Array(items) => items.last().and_then(extract_amps),
        _ => None,
    }
}

fn scalar_amps(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_number() {
        assert_eq!(decode_payload(&json!(0.0023)).unwrap().amps(), 0.0023);
        assert_eq!(decode_payload(&json!(-2)).unwrap().amps(), -2.0);
    }

    #[test]
    fn test_numeric_string() {
        assert_eq!(decode_payload(&json!(" 1e-7 ")).unwrap().amps(), 1e-7);
    }

    #[test]
    fn test_sample_record() {
        let payload = json!({"hrtime": {"seconds": 12, "nanos": 500}, "value": 0.25});
        assert_eq!(decode_payload(&payload).unwrap().amps(), 0.25);
    }

    #[test]
    fn test_single_argument_array() {
        assert_eq!(decode_payload(&json!([0.5])).unwrap().amps(), 0.5);
        assert_eq!(decode_payload(&json!([{"value": 3}])).unwrap().amps(), 3.0);
    }

    #[test]
    fn test_record_batch_decodes_newest() {
        let payload = json!([
            {"hrtime": {"seconds": 12, "nanos": 0}, "value": 0.001},
            {"hrtime": {"seconds": 12, "nanos": 500}, "value": 0.002},
        ]);
        assert_eq!(decode_payload(&payload).unwrap().amps(), 0.002);
        assert_eq!(decode_payload(&json!([1.0, 2.0])).unwrap().amps(), 2.0);
    }

    #[test]
    fn test_batch_with_malformed_newest_is_rejected() {
        let payload = json!([{"value": 0.001}, {"hrtime": {"seconds": 1, "nanos": 0}}]);
        assert!(matches!(
            decode_payload(&payload),
            Err(AmpviewError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn test_malformed_payloads_are_rejected() {
        for payload in [
            json!(null),
            json!(true),
            json!("twelve"),
            json!({"amps": 1.0}),
            json!({"value": [1.0]}),
            json!([]),
        ] {
            match decode_payload(&payload) {
                Err(AmpviewError::MalformedPayload { payload: text }) => {
                    assert_eq!(text, payload.to_string());
                }
                other => panic!("expected MalformedPayload for {payload}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        match decode_payload(&json!("NaN")) {
            Err(AmpviewError::NonFiniteSample { .. }) => {}
            other => panic!("expected NonFiniteSample, got {other:?}"),
        }
        match decode_payload(&json!("inf")) {
            Err(AmpviewError::NonFiniteSample { .. }) => {}
            other => panic!("expected NonFiniteSample, got {other:?}"),
        }
    }
}
