use rand::Rng;
use tracing::debug;

use crate::cbl::CblModel;
use crate::error::SegmentResult;
use crate::types::{boundary_unit, Token, Unit};
use crate::util::greedy_segment;

/// Running tally of the production task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProductionScore {
    pub successes: usize,
    pub attempts: usize,
}

impl ProductionScore {
    pub fn record(&mut self, success: bool) {
        self.attempts += 1;
        if success {
            self.successes += 1;
        }
    }

    /// `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        if self.attempts == 0 {
            return None;
        }
        Some(self.successes as f64 / self.attempts as f64)
    }
}

impl CblModel {
    /// Splits the utterance into the longest chunks the learner already knows.
    pub fn bag_of_chunks(&self, tokens: &[Token]) -> Vec<Unit> {
        greedy_segment(tokens, |candidate| self.frequencies.is_known_chunk(candidate))
    }

    /// Rebuilds an utterance from its bag of chunks, always continuing with
    /// the chunk of highest TP from the previous one. Ties are drawn from `rng`.
    pub fn produce<R: Rng>(&self, tokens: &[Token], rng: &mut R) -> SegmentResult<Vec<Unit>> {
        let mut bag = self.bag_of_chunks(tokens);
        let mut prev_chunk = boundary_unit();
        let mut produced = Vec::with_capacity(bag.len());

        while !bag.is_empty() {
            let mut highest = 0.0;
            let mut candidates: Vec<usize> = Vec::new();
            for (i, item) in bag.iter().enumerate() {
                let tp = self.frequencies.calc_btp_chunks(&prev_chunk, item)?;
                if tp > highest {
                    candidates = vec![i];
                    highest = tp;
                } else if tp == highest {
                    candidates.push(i);
                }
            }
            let chosen = candidates[rng.gen_range(0..candidates.len())];
            // duplicates leave the bag front first
            let first = bag.iter().position(|c| *c == bag[chosen]).unwrap_or(chosen);
            let output = bag.remove(first);

            prev_chunk = output.clone();
            produced.push(output);
        }
        Ok(produced)
    }

    /// Bag-of-chunks incremental generation task; scores an exact match against `tokens`.
    pub fn big_spa<R: Rng>(&mut self, tokens: &[Token], rng: &mut R) -> SegmentResult<bool> {
        let produced = self.produce(tokens, rng)?;
        let success = produced.concat() == tokens;
        self.production.record(success);
        debug!(
            success,
            chunks = produced.len(),
            attempts = self.production.attempts,
            "production attempt"
        );
        Ok(success)
    }
}
