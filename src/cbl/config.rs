use json::JsonValue;

use crate::error::{SegmentError, SegmentResult};
use crate::util::{get_json, get_json_string, get_json_strings};

/*
Config file section:
missing keys fall back to the default values
"cbl": {
    child_tag: "*CHI:",
    ignored_tags: ["*AGEIS:"],
    min_tokens: 3,
    pair_grace: 2,
    iterations: 10
}
*/

#[derive(Clone, Debug, PartialEq)]
pub struct CblConfig {
    // Speaker tag of the utterances used for the production task
    pub child_tag: String,
    // Lines containing any of these tags are not utterances (age markers)
    pub ignored_tags: Vec<String>,
    // Shorter lines, counting speaker tag and punctuation, are skipped
    pub min_tokens: usize,
    // A word pair seen inside chunks this many times is no longer cut on a low TP
    pub pair_grace: usize,
    // Fresh models run per corpus file; production scores are averaged over them
    pub iterations: usize,
}

impl Default for CblConfig {
    fn default() -> CblConfig {
        CblConfig {
            child_tag: String::from("*CHI:"),
            ignored_tags: vec![String::from("*AGEIS:")],
            min_tokens: 3,
            pair_grace: 2,
            iterations: 10,
        }
    }
}

impl CblConfig {
    pub fn from_json(obj: &JsonValue) -> SegmentResult<CblConfig> {
        let mut tmp_config = CblConfig::default();
        let cbl_s = "cbl";
        tmp_config.child_tag = get_json_string(obj, cbl_s, "child_tag", tmp_config.child_tag)?;
        tmp_config.ignored_tags = get_json_strings(obj, cbl_s, "ignored_tags", tmp_config.ignored_tags)?;
        tmp_config.min_tokens = get_json(obj, cbl_s, "min_tokens", tmp_config.min_tokens)?;
        tmp_config.pair_grace = get_json(obj, cbl_s, "pair_grace", tmp_config.pair_grace)?;
        tmp_config.iterations = get_json(obj, cbl_s, "iterations", tmp_config.iterations)?;
        if tmp_config.iterations == 0 {
            return Err(SegmentError::config("cbl-iterations must be at least 1"));
        }
        Ok(tmp_config)
    }

    pub fn is_ignored(&self, line: &str) -> bool {
        self.ignored_tags.iter().any(|tag| line.contains(tag.as_str()))
    }
}
