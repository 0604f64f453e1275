//! Baseline unit-activation segmenter (PARSER, Perruchet & Vinter 1998).
//!
//! Every utterance is first segmented into shaping units, greedily taking the
//! longest sequence already in the store whose weight reaches the threshold.
//! The units are then consumed as percepts of one to three units each; every
//! percept decays the whole store, interferes with the units that share its
//! tokens and strengthens (or creates) the percept itself.

use std::collections::HashSet;

use itertools::Itertools;
use rand::Rng;
use tracing::{debug, trace};

pub mod config;
pub mod file;

use crate::types::{ShallowParse, Token, Unit, WeightMap};
use crate::util::greedy_segment;

use self::config::ParserConfig;

pub struct ParserModel {
    pub config: ParserConfig,
    pub units: WeightMap,
    // parse of the most recently processed utterance
    pub shallow_parse: ShallowParse,
}

impl ParserModel {
    pub fn new(config: ParserConfig) -> ParserModel {
        ParserModel { config, units: WeightMap::new(), shallow_parse: ShallowParse::default() }
    }

    /// Processes one utterance. Each percept is one timestep; percept sizes are
    /// drawn from `rng`.
    pub fn process<R: Rng>(&mut self, utterance: &[Token], rng: &mut R) -> ShallowParse {
        let su_list = self.find_shaping_units(utterance);

        let mut remaining: &[Unit] = &su_list;
        while !remaining.is_empty() {
            // two units left: sizes 1 and 2 are equally likely
            let percept_size = match remaining.len() {
                1 => 1,
                2 => rng.gen_range(1..=2),
                _ => rng.gen_range(1..=3),
            };
            let (percept, rest) = remaining.split_at(percept_size);

            self.decay();
            self.interference(percept);
            self.add_shaping_unit(percept);
            remaining = rest;
        }

        self.clean_units();
        debug!(units = su_list.len(), store = self.units.len(), "processed utterance");
        self.shallow_parse.clone()
    }

    /// Segments the whole utterance at once. Single tokens are always
    /// admissible; longer units need a weight of at least the threshold.
    pub fn find_shaping_units(&mut self, utterance: &[Token]) -> Vec<Unit> {
        let threshold = self.config.threshold;
        let units = &self.units;
        let su_list = greedy_segment(utterance, |candidate| {
            units.get(candidate).map_or(false, |weight| *weight >= threshold)
        });
        self.shallow_parse = ShallowParse::new(su_list.clone());
        su_list
    }

    /// Units new in this timestep are added after the decay, so they never decay on creation.
    pub fn decay(&mut self) {
        let decay = self.config.decay;
        for weight in self.units.values_mut() {
            *weight += decay;
        }
    }

    /// A unit is interfered with once for every one of its tokens found in the percept.
    pub fn interference(&mut self, percept: &[Unit]) {
        let interference = self.config.interference;
        let percept_tokens: HashSet<&str> = percept.iter().flatten().map(|t| t.as_str()).collect();
        for (unit, weight) in self.units.iter_mut() {
            for token in unit {
                if percept_tokens.contains(token.as_str()) {
                    *weight += interference;
                }
            }
        }
    }

    pub fn add_shaping_unit(&mut self, percept: &[Unit]) {
        let initial_weight = self.config.initial_weight;
        let weight_added = self.config.weight_added;
        let interference = self.config.interference;

        self.units
            .entry(percept.concat())
            .and_modify(|weight| *weight += weight_added)
            .or_insert(initial_weight);

        if percept.len() > 1 {
            for unit in percept {
                if let Some(weight) = self.units.get_mut(unit) {
                    *weight += weight_added;
                    // components were interfered with earlier in this timestep
                    *weight -= interference;
                }
            }
        }
    }

    pub fn clean_units(&mut self) {
        let before = self.units.len();
        self.units.retain(|_, weight| *weight > 0.0);
        trace!(removed = before - self.units.len(), "cleaned shaping units");
    }

    pub fn weight(&self, unit: &[Token]) -> Option<f64> {
        self.units.get(unit).copied()
    }

    /// Store contents, heaviest first.
    pub fn units_by_weight(&self) -> Vec<(&Unit, f64)> {
        self.units
            .iter()
            .map(|(unit, weight)| (unit, *weight))
            .sorted_by(|(_, w1), (_, w2)| w2.total_cmp(w1))
            .collect_vec()
    }
}
