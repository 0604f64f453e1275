use std::fs;
use std::path::Path;

use json::parse;

use crate::cbl::config::CblConfig;
use crate::error::{SegmentError, SegmentResult};
use crate::parser::config::ParserConfig;

/*
Config file structure:
each section is optional, missing sections and keys use the defaults
{
    parser: { threshold, initial_weight, weight_added, decay, interference },
    cbl: { child_tag, ignored_tags, min_tokens, pair_grace, iterations }
}
*/

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelConfig {
    pub parser: ParserConfig,
    pub cbl: CblConfig,
}

impl ModelConfig {
    pub fn from_json_str(contents: &str) -> SegmentResult<ModelConfig> {
        if contents.trim().is_empty() {
            return Err(SegmentError::config("config file is empty"));
        }
        let json_data = parse(contents)?;
        if !json_data.is_object() {
            return Err(SegmentError::config("config must be a JSON object"));
        }

        let mut config = ModelConfig::default();
        let parser_s = "parser";
        if json_data.has_key(parser_s) {
            config.parser = ParserConfig::from_json(&json_data[parser_s])?;
        }
        let cbl_s = "cbl";
        if json_data.has_key(cbl_s) {
            config.cbl = CblConfig::from_json(&json_data[cbl_s])?;
        }
        Ok(config)
    }

    pub fn read_config(file_name: &Path) -> SegmentResult<ModelConfig> {
        let file_contents = fs::read_to_string(file_name)?;
        ModelConfig::from_json_str(&file_contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = ModelConfig::from_json_str(r#"{"cbl": {"iterations": 2}}"#).unwrap();
        assert_eq!(config.parser, ParserConfig::default());
        assert_eq!(config.cbl.iterations, 2);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(matches!(ModelConfig::from_json_str(""), Err(SegmentError::Config(_))));
        assert!(matches!(ModelConfig::from_json_str("{not json"), Err(SegmentError::Json(_))));
        assert!(matches!(ModelConfig::from_json_str("[1, 2]"), Err(SegmentError::Config(_))));
        assert!(ModelConfig::from_json_str(r#"{"parser": {"threshold": "high"}}"#).is_err());
    }

    #[test]
    fn test_read_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"parser": {"threshold": 0.75}}"#).unwrap();
        let config = ModelConfig::read_config(&path).unwrap();
        assert_eq!(config.parser.threshold, 0.75);
        assert_eq!(config.cbl, CblConfig::default());
    }
}
