//! Profile lists and the proficiency-test result are stored as JSON text.
//! Writes always produce valid JSON; reads never fail and fall back to an
//! empty list or no test result.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Absent or non-numeric scores read as `None` and never qualify.
    #[serde(default, deserialize_with = "number_or_none")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "bool_or_false")]
    pub passed: bool,
    /// Anything else the client attached, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestResult {
    pub fn new(score: f64, passed: bool) -> TestResult {
        TestResult {
            score: Some(score),
            passed,
            extra: Map::new(),
        }
    }
}

fn number_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

pub fn encode_list(list: &[String]) -> String {
    Value::from(list.to_vec()).to_string()
}

pub fn encode_test(test: Option<&TestResult>) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_value(test)?.to_string())
}

pub fn decode_list(column: &str, raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Option<Vec<String>>>(raw) {
        Ok(list) => list.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(column, %err, "malformed stored list, using []");
            Vec::new()
        }
    }
}

pub fn decode_test(raw: Option<&str>) -> Option<TestResult> {
    match serde_json::from_str::<Option<TestResult>>(raw?) {
        Ok(test) => test,
        Err(err) => {
            tracing::warn!(%err, "malformed stored proficiency test, using null");
            None
        }
    }
}
