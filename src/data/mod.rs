//! Host-facing data model: timestamped records and series extractors.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::scene::Color;

/// One record in the dataset. `timestamp` is epoch milliseconds; any number
/// of named numeric fields ride along for extractors to pick from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub timestamp: i64,
    pub fields: IndexMap<String, f64>,
}

impl DataItem {
    #[must_use]
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }
}

pub type Extractor = Box<dyn Fn(&DataItem) -> Option<f64> + Send + Sync>;
pub type Formatter = Box<dyn Fn(f64) -> String + Send + Sync>;

/// Extraction and presentation contract for one series.
///
/// The same type serves both flavors: continuous series draw the
/// extracted value as an interpolated line (a `None` or non-finite value
/// breaks the line), discrete series draw a marker wherever the value is
/// non-zero. A discrete value of exactly zero is treated as absent, never
/// as a markable zero; callers with meaningful zero counts must pre-encode
/// occurrence as a non-zero sentinel.
pub struct SeriesSpec {
    pub title: String,
    pub color: Color,
    extractor: Extractor,
    formatter: Formatter,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(title: impl Into<String>, color: Color, extractor: Extractor) -> Self {
        Self {
            title: title.into(),
            color,
            extractor,
            formatter: Box::new(|value| format!("{value}")),
        }
    }

    /// Convenience constructor that extracts a named field from each item.
    #[must_use]
    pub fn field(title: impl Into<String>, color: Color, field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self::new(
            title,
            color,
            Box::new(move |item| item.field(&field_name)),
        )
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Extracted value at `item`, normalized so non-finite values read as a
    /// gap.
    #[must_use]
    pub fn extract(&self, item: &DataItem) -> Option<f64> {
        (self.extractor)(item).filter(|value| value.is_finite())
    }

    /// Whether `item` carries a markable discrete event.
    #[must_use]
    pub fn has_event(&self, item: &DataItem) -> bool {
        matches!(self.extract(item), Some(value) if value != 0.0)
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        (self.formatter)(value)
    }
}

impl std::fmt::Debug for SeriesSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesSpec")
            .field("title", &self.title)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Everything the host supplies for one rendering session. Treated as
/// immutable for the duration of a render cycle.
#[derive(Debug, Default)]
pub struct ChartDataset {
    pub items: Vec<DataItem>,
    pub continuous: Vec<SeriesSpec>,
    pub discrete: Vec<SeriesSpec>,
}

impl ChartDataset {
    /// Checks the ordering invariant every bisection path relies on.
    pub fn validate(&self) -> ChartResult<()> {
        for pair in self.items.windows(2) {
            if pair[1].timestamp < pair[0].timestamp {
                return Err(ChartError::InvalidData(
                    "items must be sorted ascending by timestamp".to_owned(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn timestamps(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.timestamp).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartDataset, DataItem, SeriesSpec};
    use crate::scene::Color;

    #[test]
    fn field_spec_reads_named_field() {
        let spec = SeriesSpec::field("count", Color::rgb(0.1, 0.2, 0.3), "count");
        let item = DataItem::new(0).with_field("count", 12.5);
        assert_eq!(spec.extract(&item), Some(12.5));
        assert_eq!(spec.extract(&DataItem::new(0)), None);
    }

    #[test]
    fn non_finite_extraction_reads_as_gap() {
        let spec = SeriesSpec::field("count", Color::rgb(0.1, 0.2, 0.3), "count");
        let item = DataItem::new(0).with_field("count", f64::NAN);
        assert_eq!(spec.extract(&item), None);
    }

    #[test]
    fn zero_is_never_a_discrete_event() {
        let spec = SeriesSpec::field("alarm", Color::rgb(0.9, 0.2, 0.2), "alarm");
        assert!(!spec.has_event(&DataItem::new(0).with_field("alarm", 0.0)));
        assert!(spec.has_event(&DataItem::new(0).with_field("alarm", 1.0)));
        assert!(!spec.has_event(&DataItem::new(0)));
    }

    #[test]
    fn unsorted_items_are_rejected() {
        let dataset = ChartDataset {
            items: vec![DataItem::new(10), DataItem::new(5)],
            continuous: Vec::new(),
            discrete: Vec::new(),
        };
        assert!(dataset.validate().is_err());
    }
}
