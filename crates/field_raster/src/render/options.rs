use crate::error::{Error, Result};

/// Knobs shared by the cancellable render loops.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// The progress listener is polled after every this many completed rows.
    pub progress_interval_rows: usize,
}

impl RenderOptions {
    pub const DEFAULT_PROGRESS_INTERVAL_ROWS: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the polling cadence in rows.
    pub fn with_progress_interval_rows(mut self, rows: usize) -> Self {
        self.progress_interval_rows = rows;
        self
    }

    /// Validates the options, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.progress_interval_rows == 0 {
            return Err(Error::InvalidArgument(
                "progress_interval_rows must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Whether the listener is due after `rows_done` completed rows.
    ///
    /// Includes the final row when it falls on the cadence; a stop request at that
    /// point no longer changes the outcome.
    pub(crate) fn poll_due(&self, rows_done: usize) -> bool {
        rows_done % self.progress_interval_rows == 0
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            progress_interval_rows: Self::DEFAULT_PROGRESS_INTERVAL_ROWS,
        }
    }
}
