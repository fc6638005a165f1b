// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Timed spans.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Opaque annotation payload attached to a span.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// One measurement attempt for a named operation.
///
/// Several spans may share a name. A span is open until [`MetricSpan::close`]
/// stamps its end time; after that it never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpan {
    /// The metric name (e.g. "canvas.render").
    pub name: String,
    /// Clock reading when the span was opened, in milliseconds.
    pub start_time: f64,
    /// Clock reading when the span was closed.
    pub end_time: Option<f64>,
    /// `end_time - start_time`, once closed.
    pub duration: Option<f64>,
    /// Caller-supplied annotations.
    #[serde(default)]
    pub metadata: Metadata,
}

impl MetricSpan {
    /// Opens a span starting at `start_time`.
    pub fn open(name: impl Into<String>, start_time: f64, metadata: Metadata) -> Self {
        Self {
            name: name.into(),
            start_time,
            end_time: None,
            duration: None,
            metadata,
        }
    }

    /// Returns `true` once the span has an end time.
    pub fn is_closed(&self) -> bool {
        self.end_time.is_some()
    }

    /// Closes the span at `end_time` and returns its duration.
    ///
    /// Closing an already closed span changes nothing and returns `None`.
    pub fn close(&mut self, end_time: f64) -> Option<f64> {
        if self.is_closed() {
            return None;
        }
        let duration = end_time - self.start_time;
        self.end_time = Some(end_time);
        self.duration = Some(duration);
        Some(duration)
    }
}

/// Token returned when a span is opened.
///
/// It carries the metric name, which is all `end_metric` needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpanToken(String);

impl SpanToken {
    /// Wraps a metric name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The metric name this token refers to.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for SpanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn close_stamps_end_and_duration() {
        let mut span = MetricSpan::open("canvas.render", 10.0, Metadata::new());
        assert!(!span.is_closed());

        let duration = span.close(14.5).expect("first close succeeds");
        assert_relative_eq!(duration, 4.5);
        assert_eq!(span.end_time, Some(14.5));
        assert_eq!(span.duration, Some(4.5));
    }

    #[test]
    fn closed_span_is_never_mutated() {
        let mut span = MetricSpan::open("canvas.render", 0.0, Metadata::new());
        span.close(5.0);
        assert_eq!(span.close(99.0), None);
        assert_eq!(span.end_time, Some(5.0));
        assert_eq!(span.duration, Some(5.0));
    }

    #[test]
    fn span_serializes_with_camel_case_fields() {
        let mut metadata = Metadata::new();
        metadata.insert("shapes".to_string(), json!(12));
        let mut span = MetricSpan::open("canvas.update", 1.0, metadata);
        span.close(3.0);

        let value = serde_json::to_value(&span).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "canvas.update",
                "startTime": 1.0,
                "endTime": 3.0,
                "duration": 2.0,
                "metadata": { "shapes": 12 }
            })
        );
    }

    #[test]
    fn empty_metadata_serializes_as_empty_object() {
        let span = MetricSpan::open("canvas.render", 0.0, Metadata::new());

        let value = serde_json::to_value(&span).unwrap();
        assert_eq!(value["metadata"], json!({}));
    }

    #[test]
    fn token_echoes_name() {
        let token = SpanToken::new("collaboration.sync");
        assert_eq!(token.name(), "collaboration.sync");
        assert_eq!(token.to_string(), "collaboration.sync");
    }
}
