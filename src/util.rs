use std::str::FromStr;
use std::sync::mpsc;
use std::thread;

use itertools::Itertools;
use json::JsonValue;

use crate::error::{SegmentError, SegmentResult};
use crate::types::{Token, Unit};

/// Splits `list` into one chunk per thread and runs `f_thread` on every chunk
/// with its own clone of `context`. Results come back in list order.
pub fn multi_thread_process_list<T1, T2, T3>(
    list: &[T1],
    context: T3,
    num_threads: usize,
    f_thread: fn(T3, &[T1]) -> Vec<T2>,
) -> SegmentResult<Vec<T2>>
    where
        T1: 'static + Send + Clone,
        T2: 'static + Send,
        T3: 'static + Send + Clone
    {
    if list.is_empty() {
        return Ok(Vec::new());
    }
    let (tx, rx) = mpsc::channel::<(usize, Vec<T2>)>();

    let num_threads = num_threads.max(1);
    let num_in_chunk = (list.len() + num_threads - 1) / num_threads;

    let mut threads_spawned = 0;
    for (i, chunk) in list.chunks(num_in_chunk).enumerate() {
        let ctx = tx.clone();
        let c = context.clone();
        let list_chunk = chunk.to_vec();
        threads_spawned += 1;
        thread::spawn(move || {
            // the receiver is only dropped after every sender is gone
            let _ = ctx.send((i, f_thread(c, &list_chunk)));
        });
    }
    drop(tx);

    let results = rx.iter().sorted_by_key(|(i, _)| *i).collect_vec();
    if results.len() != threads_spawned {
        return Err(SegmentError::corpus(format!(
            "{} of {} worker threads exited without a result",
            threads_spawned - results.len(),
            threads_spawned
        )));
    }
    Ok(results.into_iter().flat_map(|(_, r)| r).collect_vec())
}

/// Greedy longest-match segmentation: at each position the longest prefix of
/// two or more tokens accepted by `is_unit` is taken, otherwise a single token.
pub fn greedy_segment<F>(tokens: &[Token], is_unit: F) -> Vec<Unit> where F: Fn(&[Token]) -> bool {
    let mut units = Vec::new();
    let mut rest = tokens;
    while !rest.is_empty() {
        let len = (2..=rest.len())
            .rev()
            .find(|&i| is_unit(&rest[..i]))
            .unwrap_or(1);
        units.push(rest[..len].to_vec());
        rest = &rest[len..];
    }
    units
}

pub fn get_percent(prob: f64) -> f64 {
    f64::ceil(prob * 10000.0) / 100.0
}

pub fn get_json<T>(obj: &JsonValue, section: &str, key: &str, def: T) -> SegmentResult<T> where T: FromStr {
    if !obj.has_key(key) {
        return Ok(def);
    }
    obj[key]
        .dump()
        .parse::<T>()
        .map_err(|_| SegmentError::config(format!("Error parsing: {}-{}", section, key)))
}

pub fn get_json_string(obj: &JsonValue, section: &str, key: &str, def: String) -> SegmentResult<String> {
    if !obj.has_key(key) {
        return Ok(def);
    }
    obj[key]
        .as_str()
        .map(String::from)
        .ok_or_else(|| SegmentError::config(format!("Error parsing: {}-{} is not a string", section, key)))
}

pub fn get_json_strings(obj: &JsonValue, section: &str, key: &str, def: Vec<String>) -> SegmentResult<Vec<String>> {
    if !obj.has_key(key) {
        return Ok(def);
    }
    if !obj[key].is_array() {
        return Err(SegmentError::config(format!("Error parsing: {}-{} is not an array", section, key)));
    }
    obj[key]
        .members()
        .map(|v| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| SegmentError::config(format!("Error parsing: {}-{} holds a non-string", section, key)))
        })
        .collect()
}
