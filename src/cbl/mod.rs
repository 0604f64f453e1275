//! Chunk-based learner (CBL, McCauley & Christiansen).
//!
//! Each word of an utterance is one timestep. The learner compares the
//! backward transition probability into the current word with the running
//! average of all TPs seen between repeated words, and starts a new chunk
//! when it falls below that average, unless the word pair has already been
//! seen inside chunks often enough to be tolerated.

use std::mem;

use rand::Rng;
use tracing::trace;

pub mod config;
pub mod file;
pub mod frequency;
pub mod production;

use crate::corpus::Utterance;
use crate::error::SegmentResult;
use crate::running_average::RunningAverage;
use crate::types::{boundary_unit, ShallowParse, Token, TokenPair, Unit, BOUNDARY_MARKER};

use self::config::CblConfig;
use self::frequency::FrequencyStore;
use self::production::ProductionScore;

pub struct CblModel {
    pub config: CblConfig,
    pub frequencies: FrequencyStore,
    pub tp_running_avg: RunningAverage<TokenPair>,
    // None until a repeated word has been seen
    pub avg_tp: Option<f64>,
    pub production: ProductionScore,
    pub shallow_parses: Vec<ShallowParse>,
}

impl CblModel {
    pub fn new(config: CblConfig) -> CblModel {
        CblModel {
            config,
            frequencies: FrequencyStore::new(),
            tp_running_avg: RunningAverage::new(),
            avg_tp: None,
            production: ProductionScore::default(),
            shallow_parses: Vec::new(),
        }
    }

    /// Processes one raw transcript line. Lines too short to hold speech give `Ok(None)`.
    pub fn process<R: Rng>(&mut self, line: &str, rng: &mut R) -> SegmentResult<Option<ShallowParse>> {
        match Utterance::parse(line, self.config.min_tokens) {
            Some(utterance) => self.process_utterance(&utterance, rng).map(Some),
            None => Ok(None),
        }
    }

    /// Child utterances go through the production task first, against what
    /// was learned before them; then the utterance is learned from.
    pub fn process_utterance<R: Rng>(&mut self, utterance: &Utterance, rng: &mut R) -> SegmentResult<ShallowParse> {
        if utterance.is_spoken_by(&self.config.child_tag) && utterance.tokens.len() > 1 {
            self.big_spa(&utterance.tokens, rng)?;
        }
        let parse = self.segment(&utterance.tokens)?;
        self.shallow_parses.push(parse.clone());
        Ok(parse)
    }

    /// On-line shallow parse of one utterance, updating every frequency table on the way.
    pub fn segment(&mut self, tokens: &[Token]) -> SegmentResult<ShallowParse> {
        let start = boundary_unit();
        self.frequencies.add_unigram(BOUNDARY_MARKER);
        self.frequencies.add_unichunk(&start);

        let mut chunks: Vec<Unit> = Vec::new();
        let mut current: Unit = Vec::new();
        let mut prev_word: &str = BOUNDARY_MARKER;

        for item in tokens {
            self.frequencies.add_unigram(item);
            self.frequencies.add_bigram(prev_word, item);

            let tp = self.frequencies.calc_btp(prev_word, item)?;
            self.update_running_average(tp, prev_word, item);

            if self.is_boundary(tp, prev_word, item) {
                self.complete_chunk(&mut chunks, &mut current);
            }
            current.push(item.clone());
            prev_word = item.as_str();
        }

        self.complete_chunk(&mut chunks, &mut current);
        // start-of-utterance marker into the first chunk
        if let Some(first) = chunks.first() {
            self.frequencies.add_bichunk(&start, first);
        }
        Ok(ShallowParse::new(chunks))
    }

    /// Only repeated words enter the running average, and never after the boundary marker.
    fn update_running_average(&mut self, tp: f64, prev_word: &str, item: &str) {
        if self.frequencies.unigram(item) > 1 && prev_word != BOUNDARY_MARKER {
            self.tp_running_avg.set((prev_word.to_owned(), item.to_owned()), tp);
            self.avg_tp = self.tp_running_avg.mean();
        }
    }

    fn is_boundary(&mut self, tp: f64, prev_word: &str, item: &str) -> bool {
        let below_average = self.avg_tp.map_or(false, |avg| tp < avg);
        if below_average {
            let cut = self.frequencies.chunk_word_pair(prev_word, item) < self.config.pair_grace;
            trace!(prev_word, item, tp, cut, "TP below running average");
            cut
        } else {
            self.frequencies.add_chunk_word_pair(prev_word, item);
            false
        }
    }

    fn complete_chunk(&mut self, chunks: &mut Vec<Unit>, current: &mut Unit) {
        // a cut before the first word closes nothing
        if current.is_empty() {
            return;
        }
        let chunk = mem::take(current);
        self.frequencies.add_unichunk(&chunk);
        if let Some(prev_chunk) = chunks.last() {
            self.frequencies.add_bichunk(prev_chunk, &chunk);
        }
        chunks.push(chunk);
    }

    pub fn production_accuracy(&self) -> Option<f64> {
        self.production.accuracy()
    }
}
