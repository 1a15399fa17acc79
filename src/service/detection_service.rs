//! Detection record intake and listing.
//!
//! Request bodies are accepted leniently: any JSON document that is not
//! "empty" (`null`, `false`, `0`, `""`, `[]`, `{}`) is taken, and missing
//! fields fall back to defaults.

use std::sync::Arc;

use serde_json::Value;

use crate::error::GlacierError;
use crate::persistence::DetectionRepository;
use crate::persistence::models::{DETECTION_LIST_LIMIT, DetectionRecord, NewDetection};

/// Thin layer over the [`DetectionRepository`].
#[derive(Debug, Clone)]
pub struct DetectionService {
    repository: Arc<DetectionRepository>,
}

impl DetectionService {
    /// Creates a new `DetectionService`.
    #[must_use]
    pub fn new(repository: Arc<DetectionRepository>) -> Self {
        Self { repository }
    }

    /// Decodes a raw request body and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::InvalidInput`] for an unusable body and
    /// [`GlacierError::PersistenceError`] on database failure.
    pub async fn create_from_body(&self, body: &[u8]) -> Result<i64, GlacierError> {
        let detection = parse_detection(body)?;
        self.record(&detection).await
    }

    /// Stores one detection.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::PersistenceError`] on database failure.
    pub async fn record(&self, detection: &NewDetection) -> Result<i64, GlacierError> {
        let id = self.repository.insert(detection).await?;
        tracing::info!(
            detection_id = id,
            detection_type = %detection.detection_type,
            confidence = detection.confidence,
            "detection saved"
        );
        Ok(id)
    }

    /// Returns the 100 newest detections, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GlacierError::PersistenceError`] on database failure.
    pub async fn latest(&self) -> Result<Vec<DetectionRecord>, GlacierError> {
        self.repository.latest(DETECTION_LIST_LIMIT).await
    }
}

/// Turns a request body into a [`NewDetection`].
///
/// # Errors
///
/// Returns [`GlacierError::InvalidInput`] if the body is not JSON or is an
/// empty value.
pub fn parse_detection(body: &[u8]) -> Result<NewDetection, GlacierError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| GlacierError::InvalidInput)?;
    if is_empty_value(&payload) {
        return Err(GlacierError::InvalidInput);
    }

    let object = payload.as_object();
    let field = |name: &'static str| object.and_then(|o| o.get(name));

    let detection_type = match field("type") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "1".to_string(),
        _ => String::new(),
    };

    let confidence = match field("confidence") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    let coordinates = match field("coordinates") {
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(v) => v.clone(),
    };

    Ok(NewDetection {
        detection_type,
        confidence,
        coordinates,
    })
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_payload() {
        let Ok(d) = parse_detection(br#"{"type":"glacier_melt","confidence":0.75,"coordinates":[10,20]}"#)
        else {
            panic!("valid payload");
        };
        assert_eq!(d.detection_type, "glacier_melt");
        assert!((d.confidence - 0.75).abs() < f64::EPSILON);
        assert_eq!(d.coordinates, json!([10, 20]));
    }

    #[test]
    fn missing_fields_get_defaults() {
        let Ok(d) = parse_detection(br#"{"note":"x"}"#) else {
            panic!("non-empty object is accepted");
        };
        assert_eq!(d.detection_type, "");
        assert!(d.confidence.abs() < f64::EPSILON);
        assert_eq!(d.coordinates, json!([]));
    }

    #[test]
    fn numeric_strings_and_scalars_are_coerced() {
        let Ok(d) = parse_detection(br#"{"type":5,"confidence":"0.9"}"#) else {
            panic!("payload is accepted");
        };
        assert_eq!(d.detection_type, "5");
        assert!((d.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn non_finite_confidence_strings_become_zero() {
        for raw in ["NaN", "inf", "-infinity", "Infinity"] {
            let body = format!(r#"{{"type":"x","confidence":"{raw}"}}"#);
            let Ok(d) = parse_detection(body.as_bytes()) else {
                panic!("payload is accepted");
            };
            assert!(d.confidence.abs() < f64::EPSILON, "{raw} gave {}", d.confidence);
        }
    }

    #[test]
    fn confidence_is_not_range_checked() {
        let Ok(d) = parse_detection(br#"{"confidence":7.5}"#) else {
            panic!("payload is accepted");
        };
        assert!((d.confidence - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unusable_bodies_are_invalid_input() {
        let bodies: [&[u8]; 8] = [b"not json", b"", b"null", b"{}", b"[]", b"false", b"0", b"\"\""];
        for body in bodies {
            assert!(
                matches!(parse_detection(body), Err(GlacierError::InvalidInput)),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[tokio::test]
    async fn create_then_list() {
        let service = DetectionService::new(Arc::new(DetectionRepository::in_memory()));
        let Ok(id) = service
            .create_from_body(br#"{"type":"glacier_melt","confidence":0.75,"coordinates":[10,20]}"#)
            .await
        else {
            panic!("create failed");
        };
        assert!(id > 0);

        let Ok(rows) = service.latest().await else {
            panic!("list failed");
        };
        assert!(rows.iter().any(|r| r.id == id && (r.confidence - 0.75).abs() < f64::EPSILON));
    }

    #[tokio::test]
    async fn latest_is_capped_at_100_newest_first() {
        let service = DetectionService::new(Arc::new(DetectionRepository::in_memory()));
        for i in 0..101 {
            let body = format!(r#"{{"type":"d{i}","confidence":0.5}}"#);
            let Ok(_) = service.create_from_body(body.as_bytes()).await else {
                panic!("create failed");
            };
        }

        let Ok(rows) = service.latest().await else {
            panic!("list failed");
        };
        assert_eq!(rows.len(), 100);
        assert_eq!(rows.first().map(|r| r.detection_type.as_str()), Some("d100"));
        assert_eq!(rows.last().map(|r| r.detection_type.as_str()), Some("d1"));
        assert!(rows.windows(2).all(|w| match w {
            [a, b] => (a.timestamp, a.id) > (b.timestamp, b.id),
            _ => true,
        }));
    }
}
