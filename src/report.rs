use std::path::{Path, PathBuf};

use crate::error::SegmentResult;
use crate::util::get_percent;

/// Outcome of running one model over one corpus file.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub file: PathBuf,
    pub model: &'static str,
    pub iterations: usize,
    pub utterances: usize,
    // mean production accuracy over the iterations, if any attempt was made
    pub mean_accuracy: Option<f64>,
}

impl RunSummary {
    pub fn accuracy_label(&self) -> String {
        match self.mean_accuracy {
            Some(acc) => format!("{}%", get_percent(acc)),
            None => String::from("n/a"),
        }
    }
}

// file,model,iterations,utterances,mean_accuracy
pub fn write_report(path: &Path, summaries: &[RunSummary]) -> SegmentResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["file", "model", "iterations", "utterances", "mean_accuracy"])?;
    for summary in summaries {
        let accuracy = summary.mean_accuracy.map(|acc| acc.to_string()).unwrap_or_default();
        writer.write_record([
            summary.file.display().to_string(),
            summary.model.to_string(),
            summary.iterations.to_string(),
            summary.utterances.to_string(),
            accuracy,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_report_leaves_missing_accuracy_blank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let summaries = vec![
            RunSummary { file: PathBuf::from("a.capp"), model: "cbl", iterations: 10, utterances: 4, mean_accuracy: Some(0.5) },
            RunSummary { file: PathBuf::from("b.parsed"), model: "parser", iterations: 1, utterances: 2, mean_accuracy: None },
        ];
        write_report(&path, &summaries).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "a.capp");
        assert_eq!(&rows[0][4], "0.5");
        assert_eq!(&rows[1][1], "parser");
        assert_eq!(&rows[1][4], "");
    }

    #[test]
    fn test_accuracy_label() {
        let mut summary = RunSummary { file: PathBuf::new(), model: "cbl", iterations: 1, utterances: 0, mean_accuracy: Some(0.25) };
        assert_eq!(summary.accuracy_label(), "25%");
        summary.mean_accuracy = None;
        assert_eq!(summary.accuracy_label(), "n/a");
    }
}
