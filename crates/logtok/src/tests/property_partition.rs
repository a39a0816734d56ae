use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::arbitrary::{LogLine, SmallDelimiters, test_count};
use crate::{DelimiterSet, ScanStrategy, Tokenizer, TokenizerOptions, fnv1a};

fn reference_ids(line: &[u8], delimiters: &DelimiterSet) -> Vec<u32> {
    line.split(|&b| delimiters.contains(b))
        .filter(|part| !part.is_empty())
        .map(fnv1a)
        .collect()
}

fn tokenizer(delimiters: DelimiterSet, strategy: ScanStrategy) -> Tokenizer {
    Tokenizer::new(TokenizerOptions {
        delimiters,
        strategy,
        ..Default::default()
    })
    .expect("at most eight delimiters")
}

/// Property: token spans cover exactly the non-delimiter bytes, each token
/// is maximal, and spans are disjoint and ordered.
#[test]
fn spans_partition_the_line() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(line: LogLine, delimiters: SmallDelimiters, strategy: ScanStrategy) -> bool {
        let line = line.0;
        let set = delimiters.0;
        let t = tokenizer(set.clone(), strategy);

        let mut covered = alloc::vec![false; line.len()];
        let mut last_end = 0;
        for token in t.tokens(&line) {
            let span = token.span();
            if span.is_empty() || span.start < last_end || &line[span.clone()] != token.bytes {
                return false;
            }
            let starts_after_boundary = span.start == 0 || set.contains(line[span.start - 1]);
            let ends_at_boundary = span.end == line.len() || set.contains(line[span.end]);
            if !starts_after_boundary || !ends_at_boundary {
                return false;
            }
            for slot in &mut covered[span.clone()] {
                *slot = true;
            }
            last_end = span.end;
        }

        line.iter()
            .zip(&covered)
            .all(|(&b, &hit)| hit != set.contains(b))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(LogLine, SmallDelimiters, ScanStrategy) -> bool);
}

/// Property: identifiers match a plain `split` + FNV-1a reference.
#[test]
fn ids_match_split_reference() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(line: LogLine, delimiters: SmallDelimiters, strategy: ScanStrategy) -> bool {
        let t = tokenizer(delimiters.0.clone(), strategy);
        t.tokenize_to_vec(&line.0, usize::MAX) == reference_ids(&line.0, &delimiters.0)
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(LogLine, SmallDelimiters, ScanStrategy) -> bool);
}

/// Property: the chunked and lookup paths agree on arbitrary bytes, not
/// only log-shaped lines.
#[test]
fn chunked_and_lookup_agree_on_raw_bytes() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Vec<u8>, delimiters: SmallDelimiters) -> bool {
        let chunked = tokenizer(delimiters.0.clone(), ScanStrategy::Chunked);
        let lookup = tokenizer(delimiters.0, ScanStrategy::Lookup);
        chunked.tokens(&bytes).eq(lookup.tokens(&bytes))
    }

    QuickCheck::new()
        .tests(test_count())
        .quickcheck(prop as fn(Vec<u8>, SmallDelimiters) -> bool);
}
