use json::JsonValue;

use crate::error::SegmentResult;
use crate::util::get_json;

/*
Config file section:
missing keys fall back to the default values
"parser": {
    threshold: 1.0,
    initial_weight: 1.0,
    weight_added: 0.5,
    decay: -0.0001,
    interference: -0.00001
}
*/

#[derive(Clone, Debug, PartialEq)]
pub struct ParserConfig {
    // Minimum weight for a multi-token unit to be used during segmentation
    pub threshold: f64,
    // Weight given to a unit the first time it is perceived
    pub initial_weight: f64,
    // Added to a unit each time it is perceived again
    pub weight_added: f64,
    // Added to every unit once per percept (negative)
    pub decay: f64,
    // Added to a unit once per token it shares with the percept (negative)
    pub interference: f64,
}

impl Default for ParserConfig {
    fn default() -> ParserConfig {
        ParserConfig {
            threshold: 1.0,
            initial_weight: 1.0,
            weight_added: 0.5,
            decay: -0.0001,
            interference: -0.00001,
        }
    }
}

impl ParserConfig {
    pub fn from_json(obj: &JsonValue) -> SegmentResult<ParserConfig> {
        let mut tmp_config = ParserConfig::default();
        let parser_s = "parser";
        tmp_config.threshold = get_json(obj, parser_s, "threshold", tmp_config.threshold)?;
        tmp_config.initial_weight = get_json(obj, parser_s, "initial_weight", tmp_config.initial_weight)?;
        tmp_config.weight_added = get_json(obj, parser_s, "weight_added", tmp_config.weight_added)?;
        tmp_config.decay = get_json(obj, parser_s, "decay", tmp_config.decay)?;
        tmp_config.interference = get_json(obj, parser_s, "interference", tmp_config.interference)?;
        Ok(tmp_config)
    }
}
