use quiz_core::model::Progress;

/// Running score, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreView {
    pub score: u32,
    pub total: u32,
}

impl ScoreView {
    #[must_use]
    pub fn from_progress(progress: &Progress) -> Self {
        Self {
            score: progress.score(),
            total: progress.total_answered(),
        }
    }

    /// Whole-number percentage of correct answers, `None` before the first answer.
    #[must_use]
    pub fn percent(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let pct = u64::from(self.score) * 100 / u64::from(self.total);
        u32::try_from(pct).ok()
    }
}
