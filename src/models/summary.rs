// src/models/summary.rs

use serde::Serialize;

/// Parallel label/value sequences, ready to be drawn as a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries<T> {
    pub labels: Vec<String>,
    pub values: Vec<T>,
}

impl<T> Default for ChartSeries<T> {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> ChartSeries<T> {
    pub fn push(&mut self, label: impl Into<String>, value: T) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&T> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|idx| &self.values[idx])
    }
}

impl<T: PartialOrd + Default> ChartSeries<T> {
    /// Drops entries that contribute nothing to a proportional (pie) breakdown.
    pub fn proportional(self) -> Self {
        let zero = T::default();
        let (labels, values) = self
            .labels
            .into_iter()
            .zip(self.values)
            .filter(|(_, v)| *v > zero)
            .unzip();
        Self { labels, values }
    }
}

/// Dashboard payload: top score percentages (bar) and attempt counts (pie).
#[derive(Debug, Clone, Serialize)]
pub struct SubjectSummary {
    pub top_scores: ChartSeries<f64>,
    pub attempts: ChartSeries<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_drops_zero_entries_and_keeps_order() {
        let mut series = ChartSeries::default();
        series.push("Math", 2_i64);
        series.push("History", 0);
        series.push("Physics", 5);

        let pie = series.proportional();
        assert_eq!(pie.labels, vec!["Math", "Physics"]);
        assert_eq!(pie.values, vec![2, 5]);
    }

    #[test]
    fn get_looks_up_by_label() {
        let mut series = ChartSeries::default();
        series.push("Math", 80.0);
        assert_eq!(series.get("Math"), Some(&80.0));
        assert_eq!(series.get("Art"), None);
        assert_eq!(series.len(), 1);
    }
}
