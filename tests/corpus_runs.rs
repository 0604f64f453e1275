use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;

use segmentation::cbl::config::CblConfig;
use segmentation::cbl::file::run_corpus_file;
use segmentation::config::ModelConfig;
use segmentation::corpus::{find_corpus_files, tokenize_segmented};
use segmentation::parser::file::shallow_parse_file;
use segmentation::report::write_report;

const TRANSCRIPT: &str = "\
*AGEIS: 20 .
*MOT: look at the doggy !
*MOT: the doggy is big .
*CHI: doggy .
*MOT: do you want the ball ?
*CHI: want the ball .
*MOT: the ball is under the table .
*MOT: look at the ball .
*CHI: look at the doggy .
";

const GOLD: &str = "\
look || at || the doggy
the doggy || is || big
do || you || want || the ball
the ball || is || under || the table
";

#[test]
fn both_models_run_over_a_corpus_directory() {
    let dir = tempfile::tempdir().unwrap();
    let session = dir.path().join("eve");
    fs::create_dir(&session).unwrap();
    fs::write(session.join("eve01.capp"), TRANSCRIPT).unwrap();
    fs::write(session.join("eve01.parsed"), GOLD).unwrap();

    let config = ModelConfig::from_json_str(r#"{"cbl": {"iterations": 4}}"#).unwrap();

    let capp = find_corpus_files(dir.path(), ".capp").unwrap();
    assert_eq!(capp.len(), 1);
    let cbl_summary = run_corpus_file(&capp[0], &config.cbl, 2024, 2).unwrap();
    assert_eq!(cbl_summary.iterations, 4);
    assert_eq!(cbl_summary.utterances, 8);
    assert!(cbl_summary.mean_accuracy.is_some());

    let parsed = find_corpus_files(dir.path(), ".parsed").unwrap();
    assert_eq!(parsed.len(), 1);
    let parser_summary = shallow_parse_file(&parsed[0], &config.parser, &mut StdRng::seed_from_u64(2024)).unwrap();
    assert_eq!(parser_summary.utterances, 4);

    // every written parse keeps the words of its input line
    let cbl_out = fs::read_to_string(session.join("eve01.sh.parses")).unwrap();
    let spoken = TRANSCRIPT
        .lines()
        .filter(|line| !line.contains("*AGEIS:"))
        .map(|line| {
            let words: Vec<&str> = line.split_whitespace().collect();
            words[1..words.len() - 1].join(" ")
        });
    for (written, expected) in cbl_out.lines().zip(spoken) {
        assert_eq!(tokenize_segmented(written).join(" "), expected);
    }

    let parser_out = fs::read_to_string(session.join("eve01.su.parses")).unwrap();
    for (written, gold) in parser_out.lines().zip(GOLD.lines()) {
        assert_eq!(tokenize_segmented(written), tokenize_segmented(gold));
    }

    let report = dir.path().join("scores.csv");
    write_report(&report, &[cbl_summary, parser_summary]).unwrap();
    let rows = fs::read_to_string(&report).unwrap();
    assert_eq!(rows.lines().count(), 3);
}

#[test]
fn cbl_runs_replay_with_the_same_seed() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("adam.capp");
    fs::write(&input, TRANSCRIPT).unwrap();
    let config = CblConfig { iterations: 3, ..CblConfig::default() };

    let first = run_corpus_file(&input, &config, 99, 1).unwrap();
    let first_parses = fs::read_to_string(dir.path().join("adam.sh.parses")).unwrap();
    let second = run_corpus_file(&input, &config, 99, 3).unwrap();
    let second_parses = fs::read_to_string(dir.path().join("adam.sh.parses")).unwrap();

    assert_eq!(first.mean_accuracy, second.mean_accuracy);
    assert_eq!(first_parses, second_parses);
}
