use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use tracing::info;

use crate::corpus::{output_path, read_lines, tokenize_segmented};
use crate::error::SegmentResult;
use crate::parser::*;
use crate::report::RunSummary;

pub const CORPUS_MARKER: &str = ".parsed";
pub const OUTPUT_SUFFIX: &str = ".su.parses";

impl ParserModel {
    /// Processes gold-segmented lines in order, one shallow parse per line.
    pub fn parse_lines<R: Rng>(&mut self, lines: &[String], rng: &mut R) -> Vec<ShallowParse> {
        lines
            .iter()
            .map(|line| self.process(&tokenize_segmented(line), rng))
            .collect_vec()
    }
}

// the dog || runs\n
pub fn save_parses(path: &Path, parses: &[ShallowParse]) -> SegmentResult<()> {
    let mut file = BufWriter::new(File::create(path)?);
    for parse in parses {
        writeln!(file, "{}", parse)?;
    }
    file.flush()?;
    Ok(())
}

/// Runs a fresh model over one corpus file and writes its parses next to it.
pub fn shallow_parse_file<R: Rng>(path: &Path, config: &ParserConfig, rng: &mut R) -> SegmentResult<RunSummary> {
    let lines = read_lines(path)?;
    let mut model = ParserModel::new(config.clone());
    let parses = model.parse_lines(&lines, rng);

    let out_path = output_path(path, CORPUS_MARKER, OUTPUT_SUFFIX);
    save_parses(&out_path, &parses)?;
    info!(
        file = %path.display(),
        utterances = parses.len(),
        units = model.units.len(),
        "wrote {}", out_path.display()
    );

    Ok(RunSummary {
        file: path.to_path_buf(),
        model: "parser",
        iterations: 1,
        utterances: parses.len(),
        mean_accuracy: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;

    #[test]
    fn test_shallow_parse_file_writes_one_line_per_utterance() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("eve01.parsed");
        fs::write(&input, "the dog || runs\nthe dog || sleeps\nwhere || is || the dog\n").unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let summary = shallow_parse_file(&input, &ParserConfig::default(), &mut rng).unwrap();
        assert_eq!(summary.utterances, 3);
        assert_eq!(summary.mean_accuracy, None);

        let written = fs::read_to_string(dir.path().join("eve01.su.parses")).unwrap();
        let lines = written.lines().collect_vec();
        assert_eq!(lines.len(), 3);
        assert_eq!(tokenize_segmented(lines[2]), vec!["where", "is", "the", "dog"]);
    }
}
