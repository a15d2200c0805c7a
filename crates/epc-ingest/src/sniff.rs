//! Delimiter sniffing over a small text sample.

/// Bytes of the file sampled when inferring a delimiter.
pub const SNIFF_SAMPLE_BYTES: usize = 2048;

/// Candidate delimiters in preference order.
pub const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Cut a prefix of at most `max_bytes` without splitting a UTF-8 character.
pub(crate) fn sample_prefix(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Infer the most plausible delimiter from a text sample.
///
/// Each candidate is scored by how consistently its per-line count repeats
/// (a real delimiter appears the same number of times on every record),
/// with the total occurrence count as tie-breaker. Candidates that never
/// appear are out; `None` means no candidate appeared at all.
pub fn sniff_delimiter(sample: &str) -> Option<u8> {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, f64, usize)> = None;
    for candidate in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.bytes().filter(|byte| *byte == candidate).count())
            .collect();
        let total: usize = counts.iter().sum();
        if total == 0 {
            continue;
        }
        let modal = modal_count(&counts);
        let consistent = counts.iter().filter(|count| **count == modal).count();
        let consistency = consistent as f64 / counts.len() as f64;
        let better = match best {
            None => true,
            Some((_, best_consistency, best_total)) => {
                consistency > best_consistency
                    || (consistency == best_consistency && total > best_total)
            }
        };
        if better {
            best = Some((candidate, consistency, total));
        }
    }
    best.map(|(candidate, _, _)| candidate)
}

fn modal_count(counts: &[usize]) -> usize {
    let mut tally: std::collections::BTreeMap<usize, usize> = std::collections::BTreeMap::new();
    for count in counts {
        *tally.entry(*count).or_default() += 1;
    }
    tally
        .into_iter()
        .max_by_key(|(_, occurrences)| *occurrences)
        .map(|(count, _)| count)
        .unwrap_or(0)
}
