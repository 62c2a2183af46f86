//! JSON Lines output of populated objects.

use crate::json::populated_object_to_json;
use seedfill_generator::{GeneratorError, Populator};
use std::io::Write;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while writing objects.
#[derive(Error, Debug)]
pub enum OutputError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Population error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of objects written.
    pub objects_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate objects per second.
    pub fn objects_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.objects_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Populate `count` objects of `type_name` and write them as JSON Lines.
pub fn write_jsonl<W: Write>(
    populator: &mut Populator,
    type_name: &str,
    count: u64,
    mut writer: W,
) -> Result<PopulateMetrics, OutputError> {
    let start_time = Instant::now();
    let mut metrics = PopulateMetrics::default();

    info!("Generating {} objects of type '{}'", count, type_name);

    for object in populator.populate_many(type_name, count)? {
        let object = object?;
        let json = populated_object_to_json(&object);
        serde_json::to_writer(&mut writer, &json)?;
        writeln!(writer)?;

        metrics.objects_written += 1;

        if metrics.objects_written % 10000 == 0 {
            debug!("Written {} objects", metrics.objects_written);
        }
    }

    writer.flush()?;
    metrics.total_duration = start_time.elapsed();

    info!(
        "Generation complete: {} objects in {:?} ({:.2} objects/sec)",
        metrics.objects_written,
        metrics.total_duration,
        metrics.objects_per_second()
    );

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedfill_core::{ObjectSchema, PopulateParameters};

    fn test_schema() -> ObjectSchema {
        ObjectSchema::from_yaml(
            r#"
types:
  - name: users
    fields:
      - name: email
        type:
          type: var_char
          length: 255
        generator:
          type: pattern
          pattern: "user_{index}@example.com"
      - name: age
        type: int
        generator:
          type: int_range
          min: 18
          max: 80
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_metrics() {
        let metrics = PopulateMetrics {
            objects_written: 1000,
            total_duration: Duration::from_secs(10),
        };
        assert_eq!(metrics.objects_per_second(), 100.0);
        assert_eq!(PopulateMetrics::default().objects_per_second(), 0.0);
    }

    #[test]
    fn test_write_jsonl() {
        let mut populator =
            Populator::new(test_schema(), PopulateParameters::default().seed(42)).unwrap();
        let mut buffer = Vec::new();

        let metrics = write_jsonl(&mut populator, "users", 10, &mut buffer).unwrap();
        assert_eq!(metrics.objects_written, 10);

        let content = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 10);

        for (i, line) in lines.iter().enumerate() {
            let json: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(json["email"], format!("user_{i}@example.com"));
            let age = json["age"].as_i64().unwrap();
            assert!((18..=80).contains(&age));
        }
    }

    #[test]
    fn test_write_jsonl_unknown_type() {
        let mut populator = Populator::new(test_schema(), PopulateParameters::default()).unwrap();
        let result = write_jsonl(&mut populator, "orders", 1, Vec::new());
        assert!(matches!(result, Err(OutputError::Generator(_))));
    }
}
