use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::cbl::*;
use crate::corpus::{output_path, read_lines};
use crate::error::SegmentResult;
use crate::report::RunSummary;
use crate::util::{get_percent, multi_thread_process_list};

pub const CORPUS_MARKER: &str = ".capp";
pub const OUTPUT_SUFFIX: &str = ".sh.parses";

/// What one fresh model produced over a whole corpus file.
#[derive(Clone, Debug)]
pub struct IterationOutcome {
    pub iteration: usize,
    pub accuracy: Option<f64>,
    pub utterances: usize,
    // only kept for the last iteration
    pub parses: Option<Vec<ShallowParse>>,
}

type IterationContext = (CblConfig, Arc<Vec<String>>, u64);

impl CblModel {
    /// Feeds every line in order, skipping ignored lines. Returns the number of utterances learned from.
    pub fn process_lines<R: Rng>(&mut self, lines: &[String], rng: &mut R) -> SegmentResult<usize> {
        let mut utterances = 0;
        for line in lines {
            if self.config.is_ignored(line) {
                continue;
            }
            if self.process(line, rng)?.is_some() {
                utterances += 1;
            }
        }
        Ok(utterances)
    }
}

/// Iteration `i` uses a `StdRng` seeded with `base_seed + i`, so a run replays
/// the same way whatever the thread count.
pub fn run_iteration(config: &CblConfig, lines: &[String], base_seed: u64, iteration: usize) -> SegmentResult<IterationOutcome> {
    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(iteration as u64));
    let mut model = CblModel::new(config.clone());
    let utterances = model.process_lines(lines, &mut rng)?;
    debug!(iteration, utterances, accuracy = ?model.production_accuracy(), "finished iteration");

    let is_last = iteration + 1 == config.iterations;
    Ok(IterationOutcome {
        iteration,
        accuracy: model.production_accuracy(),
        utterances,
        parses: if is_last { Some(model.shallow_parses) } else { None },
    })
}

pub fn run_iterations(config: &CblConfig, lines: Vec<String>, base_seed: u64, num_threads: usize) -> SegmentResult<Vec<IterationOutcome>> {
    let iterations = (0..config.iterations).collect_vec();
    let context: IterationContext = (config.clone(), Arc::new(lines), base_seed);

    let f_thread = |(config, lines, base_seed): IterationContext, chunk: &[usize]| -> Vec<SegmentResult<IterationOutcome>> {
        chunk
            .iter()
            .map(|&iteration| run_iteration(&config, &lines, base_seed, iteration))
            .collect_vec()
    };

    multi_thread_process_list(&iterations, context, num_threads, f_thread)?
        .into_iter()
        .collect()
}

/// Mean over the iterations that made at least one production attempt.
pub fn mean_accuracy(outcomes: &[IterationOutcome]) -> Option<f64> {
    let scores = outcomes.iter().filter_map(|o| o.accuracy).collect_vec();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
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

/// Runs every iteration over one corpus file, writes the parses of the last
/// iteration next to it and reports the mean production accuracy.
pub fn run_corpus_file(path: &Path, config: &CblConfig, base_seed: u64, num_threads: usize) -> SegmentResult<RunSummary> {
    let lines = read_lines(path)?;
    let outcomes = run_iterations(config, lines, base_seed, num_threads)?;

    let last = outcomes.iter().max_by_key(|o| o.iteration);
    let utterances = last.map_or(0, |o| o.utterances);
    if let Some(parses) = last.and_then(|o| o.parses.as_ref()) {
        let out_path = output_path(path, CORPUS_MARKER, OUTPUT_SUFFIX);
        save_parses(&out_path, parses)?;
        debug!("wrote {}", out_path.display());
    }

    let summary = RunSummary {
        file: path.to_path_buf(),
        model: "cbl",
        iterations: outcomes.len(),
        utterances,
        mean_accuracy: mean_accuracy(&outcomes),
    };
    match summary.mean_accuracy {
        Some(acc) => info!(file = %path.display(), iterations = summary.iterations, "production accuracy: {}%", get_percent(acc)),
        None => info!(file = %path.display(), "no production attempts"),
    }
    Ok(summary)
}
