use std::collections::{BTreeMap, HashSet};

use super::summary::NumericSummary;

/// Cells of a single column; `None` marks a missing value
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

/// A named column of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Numeric(values))
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self::new(name, ColumnData::Text(values))
    }

    /// Numeric column without missing cells
    pub fn from_numbers(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::numeric(name, values.into_iter().map(Some).collect())
    }

    /// Text column without missing cells
    pub fn from_strings<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::text(name, values.into_iter().map(|v| Some(v.into())).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    /// Distinct non-missing values
    pub fn unique_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values
                .iter()
                .flatten()
                .map(|v| normalized_bits(*v))
                .collect::<HashSet<_>>()
                .len(),
            ColumnData::Text(values) => values.iter().flatten().collect::<HashSet<_>>().len(),
        }
    }

    /// Most frequent value of a text column; ties go to the smallest value
    pub fn most_common(&self) -> Option<&str> {
        let ColumnData::Text(values) = &self.data else {
            return None;
        };

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for value in values.iter().flatten() {
            *counts.entry(value.as_str()).or_default() += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for (value, count) in counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }

        best.map(|(value, _)| value)
    }

    /// Descriptive statistics; `None` for text columns
    pub fn summary(&self) -> Option<NumericSummary> {
        match &self.data {
            ColumnData::Numeric(values) => Some(NumericSummary::from_values(
                values.iter().flatten().copied(),
            )),
            ColumnData::Text(_) => None,
        }
    }

    /// Cell rendered for a text preview; missing cells show as `NaN`
    pub fn display_cell(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric(values) => match values.get(row).copied().flatten() {
                Some(value) => format_number(value),
                None => "NaN".to_string(),
            },
            ColumnData::Text(values) => match values.get(row) {
                Some(Some(value)) => value.clone(),
                _ => "NaN".to_string(),
            },
        }
    }
}

/// Integral values print without a fractional part
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn normalized_bits(value: f64) -> u64 {
    // -0.0 and 0.0 are the same value
    if value == 0.0 { 0 } else { value.to_bits() }
}
