use std::hash::Hash;

use crate::error::{SegmentError, SegmentResult};
use crate::types::{join_unit, ChunkPair, CountMap, Token, TokenPair, Unit};

/// Word and chunk frequencies gathered on-line by the chunk-based learner.
#[derive(Clone, Debug, Default)]
pub struct FrequencyStore {
    pub unigrams: CountMap<Token>,
    pub bigrams: CountMap<TokenPair>,
    pub unichunks: CountMap<Unit>,
    pub bichunks: CountMap<ChunkPair>,
    // adjacent words seen inside a chunk, at or above the running average TP
    pub chunk_word_pairs: CountMap<TokenPair>,
}

fn increment<K>(map: &mut CountMap<K>, key: K) where K: Hash + Eq {
    *map.entry(key).or_insert(0) += 1;
}

fn pair(w1: &str, w2: &str) -> TokenPair {
    (w1.to_owned(), w2.to_owned())
}

fn chunk_pair(c1: &[Token], c2: &[Token]) -> ChunkPair {
    (c1.to_vec(), c2.to_vec())
}

impl FrequencyStore {
    pub fn new() -> FrequencyStore {
        FrequencyStore::default()
    }

    pub fn add_unigram(&mut self, word: &str) {
        increment(&mut self.unigrams, word.to_owned());
    }

    pub fn add_bigram(&mut self, w1: &str, w2: &str) {
        increment(&mut self.bigrams, pair(w1, w2));
    }

    pub fn add_unichunk(&mut self, chunk: &[Token]) {
        increment(&mut self.unichunks, chunk.to_vec());
    }

    pub fn add_bichunk(&mut self, chunk1: &[Token], chunk2: &[Token]) {
        increment(&mut self.bichunks, chunk_pair(chunk1, chunk2));
    }

    pub fn add_chunk_word_pair(&mut self, w1: &str, w2: &str) {
        increment(&mut self.chunk_word_pairs, pair(w1, w2));
    }

    pub fn unigram(&self, word: &str) -> usize {
        self.unigrams.get(word).copied().unwrap_or(0)
    }

    pub fn bigram(&self, w1: &str, w2: &str) -> usize {
        self.bigrams.get(&pair(w1, w2)).copied().unwrap_or(0)
    }

    pub fn unichunk(&self, chunk: &[Token]) -> usize {
        self.unichunks.get(chunk).copied().unwrap_or(0)
    }

    pub fn bichunk(&self, chunk1: &[Token], chunk2: &[Token]) -> usize {
        self.bichunks.get(&chunk_pair(chunk1, chunk2)).copied().unwrap_or(0)
    }

    pub fn chunk_word_pair(&self, w1: &str, w2: &str) -> usize {
        self.chunk_word_pairs.get(&pair(w1, w2)).copied().unwrap_or(0)
    }

    pub fn is_known_chunk(&self, chunk: &[Token]) -> bool {
        self.unichunks.contains_key(chunk)
    }

    /// Backward transition probability: bigram(w1, w2) / unigram(w2).
    pub fn calc_btp(&self, w1: &str, w2: &str) -> SegmentResult<f64> {
        let denominator = self.unigram(w2);
        if denominator == 0 {
            return Err(SegmentError::UnseenDenominator(w2.to_owned()));
        }
        Ok(self.bigram(w1, w2) as f64 / denominator as f64)
    }

    /// Backward TP between chunks, 0.0 when the two were never adjacent.
    pub fn calc_btp_chunks(&self, chunk1: &[Token], chunk2: &[Token]) -> SegmentResult<f64> {
        let count = self.bichunk(chunk1, chunk2);
        if count == 0 {
            return Ok(0.0);
        }
        let denominator = self.unichunk(chunk2);
        if denominator == 0 {
            return Err(SegmentError::UnseenDenominator(join_unit(chunk2)));
        }
        Ok(count as f64 / denominator as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> Unit {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_btp_divides_by_target_count() {
        let mut store = FrequencyStore::new();
        for (w1, w2) in [("#", "the"), ("the", "dog"), ("a", "dog")] {
            store.add_unigram(w2);
            store.add_bigram(w1, w2);
        }
        assert_eq!(store.unigram("dog"), 2);
        assert_eq!(store.calc_btp("the", "dog").unwrap(), 0.5);
        assert_eq!(store.calc_btp("#", "the").unwrap(), 1.0);
        // never adjacent, but the target has been seen
        assert_eq!(store.calc_btp("dog", "the").unwrap(), 0.0);
    }

    #[test]
    fn test_btp_with_unseen_target_fails() {
        let store = FrequencyStore::new();
        match store.calc_btp("the", "zebra") {
            Err(SegmentError::UnseenDenominator(word)) => assert_eq!(word, "zebra"),
            other => panic!("expected unseen denominator, got {:?}", other),
        }
    }

    #[test]
    fn test_chunk_btp() {
        let mut store = FrequencyStore::new();
        store.add_unichunk(&unit("the dog"));
        store.add_unichunk(&unit("the dog"));
        store.add_unichunk(&unit("runs"));
        store.add_bichunk(&unit("#"), &unit("the dog"));

        assert_eq!(store.calc_btp_chunks(&unit("#"), &unit("the dog")).unwrap(), 0.5);
        assert_eq!(store.calc_btp_chunks(&unit("#"), &unit("runs")).unwrap(), 0.0);
        assert_eq!(store.calc_btp_chunks(&unit("runs"), &unit("zebra")).unwrap(), 0.0);
        assert!(store.is_known_chunk(&unit("the dog")));
        assert!(!store.is_known_chunk(&unit("the")));
    }

    #[test]
    fn test_chunk_btp_with_unseen_target_fails() {
        let mut store = FrequencyStore::new();
        store.add_bichunk(&unit("#"), &unit("ghost chunk"));
        assert!(store.calc_btp_chunks(&unit("#"), &unit("ghost chunk")).is_err());
    }

    #[test]
    fn test_keys_keep_tokens_apart() {
        let mut store = FrequencyStore::new();
        store.add_bigram("a b", "c");
        assert_eq!(store.bigram("a b", "c"), 1);
        assert_eq!(store.bigram("a", "b c"), 0);
    }
}
