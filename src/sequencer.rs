use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{OutOfTrials, SessionError};
use crate::trial::Side;

/// Largest accepted number of repetitions per side.
pub const MAX_STEP_COUNT: usize = 1_000_000;

/// Length of the sequence for `step_count`, or `None` past `MAX_STEP_COUNT`.
pub fn trial_count(step_count: usize) -> Option<usize> {
    if step_count > MAX_STEP_COUNT {
        return None;
    }
    step_count.checked_mul(Side::ALL.len())
}

/// Shuffled order of edge sides for one session plus the active frame.
#[derive(Debug, Clone)]
pub struct TrialSequencer {
    sides: Vec<Side>,
    frame: usize,
}

impl TrialSequencer {
    /// Each side appears `step_count` times, then the whole list is shuffled.
    pub fn build<R: Rng + ?Sized>(step_count: usize, rng: &mut R) -> Result<Self, SessionError> {
        let total = trial_count(step_count)
            .ok_or_else(|| SessionError::InvalidStepCount(step_count.to_string()))?;
        let mut sides: Vec<Side> = Side::ALL.iter().copied().cycle().take(total).collect();
        sides.shuffle(rng);
        Ok(Self::from_sides(sides))
    }

    /// Fixed order, no shuffling.
    pub fn from_sides(sides: Vec<Side>) -> Self {
        Self { sides, frame: 0 }
    }

    pub fn current(&self) -> Result<Side, OutOfTrials> {
        self.sides.get(self.frame).copied().ok_or(OutOfTrials)
    }

    pub fn advance(&mut self) {
        self.frame += 1;
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn len(&self) -> usize {
        self.sides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sides.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.frame >= self.sides.len()
    }

    pub fn sides(&self) -> &[Side] {
        &self.sides
    }
}
