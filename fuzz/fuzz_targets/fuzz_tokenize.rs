#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use logtok::{DelimiterSet, ScanStrategy, Tokenizer, TokenizerOptions, fnv1a};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

const HEADER: usize = 3; // flags, capacity, delimiter count

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static DELIMITERS: &[u8] = b" \t=:,;";

static WORDS: &[&[u8]] = &[
    b"level",
    b"INFO",
    b"WARN",
    b"msg",
    b"request_done",
    b"latency_ms",
    b"2024-05-01T12:00:00Z",
    b"10.0.0.7",
    b"\xe2\x9c\x93",
    b"\0",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if max_size < HEADER {
        return fuzzer_mutate(data, size, max_size);
    }
    if size < HEADER || seed.is_multiple_of(10) {
        let header = with_rng(|rng| rng.next_u32().to_le_bytes());
        data[..HEADER].copy_from_slice(&header[..HEADER]);

        let target = size.clamp(HEADER, max_size);
        let mut len = HEADER;
        while len < target {
            len += append_field(&mut data[len..max_size]);
        }
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends one `word<delims>` field, truncated to fit `buf`.
fn append_field(buf: &mut [u8]) -> usize {
    with_rng(|rng| {
        let word = WORDS[rng.random_range(0..WORDS.len())];
        let mut field = word.to_vec();
        for _ in 0..rng.random_range(1..=3) {
            field.push(DELIMITERS[rng.random_range(0..DELIMITERS.len())]);
        }
        let n = field.len().min(buf.len());
        buf[..n].copy_from_slice(&field[..n]);
        n
    })
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Config {
    flags: u8,
    capacity: u8,
    delimiter_count: u8,
}

/// Reference split: maximal runs of non-delimiter bytes, up to the first
/// NUL when it ends the line.
fn reference_ids(line: &[u8], options: &TokenizerOptions) -> Vec<u32> {
    let line = match line.iter().position(|&b| b == 0) {
        Some(end) if options.stop_at_nul => &line[..end],
        _ => line,
    };
    line.split(|&b| options.delimiters.contains(b))
        .filter(|t| !t.is_empty())
        .map(fnv1a)
        .collect()
}

fn tokenize(data: &[u8]) {
    let mut u = Unstructured::new(data);
    let Ok(config) = Config::arbitrary(&mut u) else {
        return;
    };
    let rest = u.take_rest();

    // Custom delimiters come from the front of the input, the line from the rest.
    let custom = config.flags & 1 != 0;
    let split = if custom {
        usize::from(config.delimiter_count % 12).min(rest.len())
    } else {
        0
    };
    let (delimiter_bytes, line) = rest.split_at(split);
    let options = TokenizerOptions {
        delimiters: if custom {
            DelimiterSet::new(delimiter_bytes)
        } else {
            DelimiterSet::default()
        },
        strategy: ScanStrategy::Lookup,
        max_line_bytes: (config.flags & 2 != 0).then_some(usize::from(config.flags >> 3)),
        stop_at_nul: config.flags & 4 != 0,
    };
    let boundaries =
        options.delimiters.len() + usize::from(options.stop_at_nul && !options.delimiters.contains(0));

    // Exact-length copy so any read past the end is caught.
    let line: Box<[u8]> = line.into();
    let scanned = options.max_line_bytes.map_or(&line[..], |max| &line[..max.min(line.len())]);
    let capacity = usize::from(config.capacity);

    let lookup = Tokenizer::new(options.clone()).unwrap();
    let mut expected = vec![0u32; capacity];
    let summary = lookup.tokenize(&line, &mut expected);

    let reference = reference_ids(scanned, &options);
    assert!(summary.written <= capacity);
    assert_eq!(summary.written, reference.len().min(capacity));
    assert_eq!(expected[..summary.written], reference[..summary.written]);
    assert_eq!(summary.truncated, reference.len() > capacity);

    match Tokenizer::new(TokenizerOptions {
        strategy: ScanStrategy::Chunked,
        ..options
    }) {
        Ok(chunked) => {
            let mut out = vec![0u32; capacity];
            assert_eq!(chunked.tokenize(&line, &mut out), summary);
            assert_eq!(out, expected);
        }
        Err(_) => assert!(boundaries > Tokenizer::CHUNKED_MAX_BOUNDARIES),
    }
}

fuzz_target!(|data: &[u8]| tokenize(data));
