use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

pub type Token = String;

// A shaping unit (PARSER) or a chunk (CBL): one or more tokens, in order
pub type Unit = Vec<Token>;

pub type TokenPair = (Token, Token);
pub type ChunkPair = (Unit, Unit);

// PARSER
// unit -> activation weight
pub type WeightMap = HashMap<Unit, f64>;

// CBL
pub type CountMap<K> = HashMap<K, usize>;

/// Start-of-utterance marker, used both as a word and as a chunk.
pub const BOUNDARY_MARKER: &str = "#";

/// Separator between units when a parse is written out as one line.
pub const SEGMENT_SEPARATOR: &str = "||";

pub fn boundary_unit() -> Unit {
    vec![BOUNDARY_MARKER.to_owned()]
}

pub fn join_unit(unit: &[Token]) -> String {
    unit.join(" ")
}

/// Segmentation of one utterance into units or chunks, in utterance order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShallowParse {
    pub units: Vec<Unit>,
}

impl ShallowParse {
    pub fn new(units: Vec<Unit>) -> ShallowParse {
        ShallowParse { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The tokens of the utterance with the unit boundaries removed.
    pub fn tokens(&self) -> Vec<Token> {
        self.units.iter().flatten().cloned().collect_vec()
    }
}

// the dog || runs
impl fmt::Display for ShallowParse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = format!(" {} ", SEGMENT_SEPARATOR);
        let line = self.units.iter().map(|u| join_unit(u)).join(&sep);
        f.write_str(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> Unit {
        s.split(' ').map(String::from).collect()
    }

    #[test]
    fn test_display_joins_units_with_separator() {
        let parse = ShallowParse::new(vec![unit("the dog"), unit("runs")]);
        assert_eq!(parse.to_string(), "the dog || runs");
    }

    #[test]
    fn test_tokens_flattens_units() {
        let parse = ShallowParse::new(vec![unit("a b"), unit("c"), unit("d e")]);
        assert_eq!(parse.tokens(), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(parse.len(), 3);
    }

    #[test]
    fn test_empty_parse_displays_as_empty_line() {
        let parse = ShallowParse::default();
        assert!(parse.is_empty());
        assert_eq!(parse.to_string(), "");
    }
}
