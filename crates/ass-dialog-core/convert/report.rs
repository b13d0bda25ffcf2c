//! Per-run conversion statistics

use core::fmt;

use crate::{
    parser::ParseStep,
    utils::{create_hash_map_with_capacity, FastHashMap},
};

/// Counts of lines read, rendered and skipped during one conversion
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Lines (bounded reads) consumed from the input
    pub lines_read: usize,
    /// Lines rendered to the output
    pub accepted: usize,
    /// Skipped lines keyed by the parser step that rejected them
    skipped: FastHashMap<ParseStep, usize>,
}

impl ConversionReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            accepted: 0,
            skipped: create_hash_map_with_capacity(ParseStep::ALL.len()),
        }
    }

    /// Record a line rejected at `step`
    pub fn record_skip(&mut self, step: ParseStep) {
        *self.skipped.entry(step).or_insert(0) += 1;
    }

    /// Lines rejected at `step`
    #[must_use]
    pub fn skipped_at(&self, step: ParseStep) -> usize {
        self.skipped.get(&step).copied().unwrap_or(0)
    }

    /// Total lines skipped
    #[must_use]
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Non-zero skip counts in step order
    #[must_use]
    pub fn skipped_by_step(&self) -> Vec<(ParseStep, usize)> {
        ParseStep::ALL
            .into_iter()
            .map(|step| (step, self.skipped_at(step)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} lines, rendered {}, skipped {}",
            self.lines_read,
            self.accepted,
            self.skipped_total()
        )?;

        let by_step = self.skipped_by_step();
        if !by_step.is_empty() {
            f.write_str(" (")?;
            for (i, (step, count)) in by_step.into_iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{step}: {count}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
