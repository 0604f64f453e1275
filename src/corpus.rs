use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::error::SegmentResult;
use crate::types::Token;

static SEGMENT_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\|\|\s+").expect("hardcoded regex"));

/// One transcript line: `*MOT: where is the ball ?`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utterance {
    pub speaker: String,
    pub tokens: Vec<Token>,
    pub punctuation: String,
}

impl Utterance {
    /// Lines with fewer than `min_tokens` tokens (speaker tag and final
    /// punctuation included) carry no speech and give `None`.
    pub fn parse(line: &str, min_tokens: usize) -> Option<Utterance> {
        let mut words = line.split_whitespace().map(String::from).collect_vec();
        if words.len() < min_tokens.max(2) {
            return None;
        }
        let punctuation = words.pop()?;
        let speaker = words.remove(0);
        Some(Utterance { speaker, tokens: words, punctuation })
    }

    pub fn is_spoken_by(&self, tag: &str) -> bool {
        self.speaker == tag
    }
}

/// Flattens a gold-segmented line (`the dog || runs`) into its tokens.
pub fn tokenize_segmented(line: &str) -> Vec<Token> {
    SEGMENT_SEPARATOR_RE
        .replace_all(line, " ")
        .split_whitespace()
        .map(String::from)
        .collect_vec()
}

pub fn read_lines(path: &Path) -> SegmentResult<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents.lines().map(String::from).collect_vec())
}

/// Every file under `root` whose name contains `marker`, sorted by path.
/// `root` may itself be a file.
pub fn find_corpus_files(root: &Path, marker: &str) -> SegmentResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    if root.is_file() {
        if has_marker(root, marker) {
            found.push(root.to_path_buf());
        }
        return Ok(found);
    }
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if has_marker(&path, marker) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}

fn has_marker(path: &Path, marker: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| name.contains(marker))
}

/// `corpora/eve.capp` with marker `.capp` and suffix `.sh.parses` gives `corpora/eve.sh.parses`.
pub fn output_path(input: &Path, marker: &str, suffix: &str) -> PathBuf {
    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let stem = name.split(marker).next().unwrap_or(name);
    input.with_file_name(format!("{}{}", stem, suffix))
}
