use alloc::{vec, vec::Vec};

use rstest::rstest;

use super::*;
use crate::{DEFAULT_DELIMITERS, DelimiterSet};

fn ids(parts: &[&[u8]]) -> Vec<u32> {
    parts.iter().map(|p| fnv1a(p)).collect()
}

fn both_strategies() -> [Tokenizer; 2] {
    let with = |strategy| {
        Tokenizer::new(TokenizerOptions {
            strategy,
            ..Default::default()
        })
        .unwrap()
    };
    [with(ScanStrategy::Chunked), with(ScanStrategy::Lookup)]
}

#[test]
fn key_value_line_in_order() {
    for t in both_strategies() {
        let mut out = [0u32; 3];
        let summary = t.tokenize(b"a=b,c", &mut out);
        assert_eq!(
            summary,
            Tokenized {
                written: 3,
                truncated: false
            }
        );
        assert_eq!(out.to_vec(), ids(&[b"a", b"b", b"c"]));
    }
}

#[rstest]
#[case::empty(b"")]
#[case::spaces(b"   ")]
#[case::every_delimiter(b" \t=:,;")]
#[case::long_delimiter_run(b";;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;;")]
fn no_tokens(#[case] input: &[u8]) {
    for t in both_strategies() {
        let mut out = [u32::MAX; 5];
        let summary = t.tokenize(input, &mut out);
        assert_eq!(summary.written, 0);
        assert!(!summary.truncated);
        assert_eq!(out, [u32::MAX; 5]);
    }
}

#[test]
fn zero_capacity_leaves_output_untouched() {
    let t = Tokenizer::default();
    let mut out: [u32; 0] = [];
    let summary = t.tokenize(b"abc", &mut out);
    assert_eq!(summary.written, 0);
    assert!(summary.truncated);

    let mut backing = [0xdead_beef_u32; 4];
    let summary = t.tokenize(b"abc", &mut backing[..0]);
    assert_eq!(summary.written, 0);
    assert_eq!(backing, [0xdead_beef; 4]);

    assert!(t.tokenize_to_vec(b"abc", 0).is_empty());
}

#[test]
fn repeated_calls_are_identical() {
    let t = Tokenizer::default();
    let line = b"ts=2024-05-01 level=warn msg=disk usage:91%, host=db-3;";
    let first = t.tokenize_to_vec(line, 64);
    let second = t.tokenize_to_vec(line, 64);
    assert_eq!(first, second);
    assert_eq!(first.len(), 10);
}

#[rstest]
fn each_default_delimiter_separates_two_tokens(
    #[values(b' ', b'\t', b'=', b':', b',', b';')] delimiter: u8,
) {
    for t in both_strategies() {
        let line = [b'l', b'h', b's', delimiter, b'r', b'h', b's'];
        assert_eq!(t.tokenize_to_vec(&line, 8), ids(&[b"lhs", b"rhs"]));
    }
}

#[test]
fn newline_is_not_a_delimiter() {
    let t = Tokenizer::default();
    assert_eq!(t.tokenize_to_vec(b"a\nb c", 8), ids(&[b"a\nb", b"c"]));
}

#[rstest]
#[case::one_short(CHUNK_WIDTH - 1)]
#[case::exact(CHUNK_WIDTH)]
#[case::one_over(CHUNK_WIDTH + 1)]
#[case::two_chunks(2 * CHUNK_WIDTH)]
#[case::three_and_a_bit(3 * CHUNK_WIDTH + 5)]
fn tokens_around_chunk_width(#[case] len: usize) {
    let word: Vec<u8> = (0..len).map(|i| b'a' + (i % 26) as u8).collect();
    for t in both_strategies() {
        // Token alone, token followed by a delimiter, token between two.
        let mut trailing = word.clone();
        trailing.push(b',');
        let mut framed = vec![b' '];
        framed.extend_from_slice(&word);
        framed.extend_from_slice(b"=x");

        assert_eq!(t.tokenize_to_vec(&word, 4), [fnv1a(&word)]);
        assert_eq!(t.tokenize_to_vec(&trailing, 4), [fnv1a(&word)]);
        assert_eq!(t.tokenize_to_vec(&framed, 4), [fnv1a(&word), fnv1a(b"x")]);

        let spans: Vec<_> = t.tokens(&framed).map(|tok| tok.span()).collect();
        assert_eq!(spans, [1..1 + len, len + 2..len + 3]);
    }
}

#[test]
fn delimiter_at_every_lane_of_a_window() {
    for t in both_strategies() {
        for lane in 0..CHUNK_WIDTH {
            let mut line = [b'q'; 2 * CHUNK_WIDTH];
            line[lane] = b':';
            let spans: Vec<_> = t.tokens(&line).map(|tok| tok.span()).collect();
            let expected: Vec<Range<usize>> = if lane == 0 {
                vec![1..2 * CHUNK_WIDTH]
            } else {
                vec![0..lane, lane + 1..2 * CHUNK_WIDTH]
            };
            assert_eq!(spans, expected, "delimiter in lane {lane}");
        }
    }
}

#[test]
fn output_fills_then_reports_truncation() {
    let t = Tokenizer::default();
    let mut out = [0u32; 2];
    let summary = t.tokenize(b"a b c d", &mut out);
    assert_eq!(
        summary,
        Tokenized {
            written: 2,
            truncated: true
        }
    );
    assert_eq!(out.to_vec(), ids(&[b"a", b"b"]));
}

#[test]
fn exact_fit_is_not_truncated() {
    let t = Tokenizer::default();
    let mut out = [0u32; 3];
    let summary = t.tokenize(b"a b c ,;  ", &mut out);
    assert_eq!(summary.written, 3);
    assert!(!summary.truncated);
}

#[test]
fn custom_delimiters_replace_defaults() {
    let t = Tokenizer::new(TokenizerOptions {
        delimiters: DelimiterSet::new(b"|"),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(
        t.tokenize_to_vec(b"GET /a b|200||17ms", 8),
        ids(&[b"GET /a b", b"200", b"17ms"])
    );
}

#[test]
fn empty_delimiter_set_yields_whole_line() {
    let t = Tokenizer::new(TokenizerOptions {
        delimiters: DelimiterSet::empty(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(t.strategy(), ScanStrategy::Chunked);
    let line = b"a b=c";
    assert_eq!(t.tokenize_to_vec(line, 8), [fnv1a(line)]);
}

#[test]
fn auto_falls_back_to_lookup_for_large_sets() {
    let big = DelimiterSet::new(b" \t=:,;|/[]");
    let auto = Tokenizer::new(TokenizerOptions {
        delimiters: big.clone(),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(auto.strategy(), ScanStrategy::Lookup);
    assert_eq!(
        auto.tokenize_to_vec(b"[a/b]|c", 8),
        ids(&[b"a", b"b", b"c"])
    );

    let forced = Tokenizer::new(TokenizerOptions {
        delimiters: big,
        strategy: ScanStrategy::Chunked,
        ..Default::default()
    });
    assert_eq!(
        forced.map(|_| ()),
        Err(ScanError::ChunkedSetTooLarge { count: 10, max: 8 })
    );
}

#[test]
fn nul_is_a_plain_byte_by_default() {
    let t = Tokenizer::default();
    assert_eq!(t.tokenize_to_vec(b"a\0b c", 8), ids(&[b"a\0b", b"c"]));
}

#[test]
fn stop_at_nul_ends_the_line() {
    let t = Tokenizer::new(TokenizerOptions {
        stop_at_nul: true,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(t.tokenize_to_vec(b"ab c\0stale tail", 8), ids(&[b"ab", b"c"]));
    assert_eq!(t.tokenize_to_vec(b"ab \0stale", 8), ids(&[b"ab"]));
    assert_eq!(t.tokenize_to_vec(b"\0stale", 8), ids(&[]));

    let mut out = [0u32; 1];
    let summary = t.tokenize(b"ab \0stale", &mut out);
    assert!(!summary.truncated, "nothing left before the NUL");
}

#[test]
fn stop_at_nul_wins_over_nul_delimiter() {
    let mut delimiters = DelimiterSet::default();
    delimiters.insert(0);
    let t = Tokenizer::new(TokenizerOptions {
        delimiters,
        stop_at_nul: true,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(t.tokenize_to_vec(b"a\0b", 8), ids(&[b"a"]));
}

#[test]
fn max_line_bytes_clamps_input() {
    let t = Tokenizer::new(TokenizerOptions {
        max_line_bytes: Some(6),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(t.tokenize_to_vec(b"abc defgh", 8), ids(&[b"abc", b"de"]));
    assert_eq!(t.tokenize_to_vec(b"ab", 8), ids(&[b"ab"]));
}

#[test]
fn tokens_report_offsets_and_bytes() {
    let t = Tokenizer::default();
    let tokens: Vec<_> = t.tokens(b"  k=v ").collect();
    assert_eq!(
        tokens,
        [
            Token {
                offset: 2,
                bytes: b"k",
                id: fnv1a(b"k")
            },
            Token {
                offset: 4,
                bytes: b"v",
                id: fnv1a(b"v")
            },
        ]
    );
}

#[test]
fn tokens_iterator_is_fused() {
    let t = Tokenizer::default();
    let mut it = t.tokens(b"x");
    assert!(it.next().is_some());
    assert!(it.next().is_none());
    assert!(it.next().is_none());
    assert!(!it.has_remaining());
}

#[test]
fn free_function_uses_default_delimiters() {
    let mut out = [0u32; DEFAULT_DELIMITERS.len() + 1];
    let summary = crate::tokenize(b"a b\tc=d:e,f;g", &mut out);
    assert_eq!(summary.written, 7);
    assert_eq!(out.to_vec(), ids(&[b"a", b"b", b"c", b"d", b"e", b"f", b"g"]));
}

#[test]
fn high_bytes_are_token_content() {
    let t = Tokenizer::default();
    let line = "naïve=café".as_bytes();
    assert_eq!(
        t.tokenize_to_vec(line, 4),
        ids(&["naïve".as_bytes(), "café".as_bytes()])
    );
}
