//! Fuzzy string scorers on a 0..=100 scale.
//!
//! `wratio` is the weighted ratio used for symptom matching. It combines a
//! plain indel ratio with partial-window and token-based scorers so that
//! reordered words ("throat sore") and contained phrases ("acne" in
//! "bad acne") still score high. Every scorer returns 0 when either input is
//! empty. Lengths are counted in chars.

use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;

/// Length of the longest common subsequence.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ac in a {
        for (j, &bc) in b.iter().enumerate() {
            curr[j + 1] = if ac == bc {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Similarity from the insert/delete edit distance, normalized by the
/// combined length.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best `ratio` of the shorter string against any same-length window of the
/// longer one, including windows cut off at either end.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0.0;
    }
    let (m, n) = (short.len(), long.len());

    let mut best = 0.0f64;
    for start in 0..=(n - m) {
        best = best.max(ratio_chars(&short, &long[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }
    for k in 1..m {
        best = best
            .max(ratio_chars(&short, &long[..k]))
            .max(ratio_chars(&short, &long[n - k..]));
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// `ratio` after sorting the whitespace-separated tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Compares the shared token set against each side's leftovers.
///
/// When one token set contains the other the score is 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let sect: Vec<&str> = ta.intersection(&tb).copied().collect();
    let diff_ab: Vec<&str> = ta.difference(&tb).copied().collect();
    let diff_ba: Vec<&str> = tb.difference(&ta).copied().collect();
    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab_joined: Vec<char> = diff_ab.join(" ").chars().collect();
    let diff_ba_joined: Vec<char> = diff_ba.join(" ").chars().collect();
    let ab_len = diff_ab_joined.len();
    let ba_len = diff_ba_joined.len();
    let sect_len = sect.join(" ").chars().count();

    // "sect ab" and "sect ba" share the sect prefix, so their indel distance
    // is that of the leftovers alone.
    let sep = usize::from(sect_len != 0);
    let sect_ab_len = sect_len + sep + ab_len;
    let sect_ba_len = sect_len + sep + ba_len;
    let dist = ab_len + ba_len - 2 * lcs_len(&diff_ab_joined, &diff_ba_joined);
    let result = norm_distance(dist, sect_ab_len + sect_ba_len);
    if sect_len == 0 {
        return result;
    }

    let sect_ab_ratio = norm_distance(sep + ab_len, sect_len + sect_ab_len);
    let sect_ba_ratio = norm_distance(sep + ba_len, sect_len + sect_ba_len);
    result.max(sect_ab_ratio).max(sect_ba_ratio)
}

fn norm_distance(dist: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 0.0;
    }
    100.0 - 100.0 * dist as f64 / lensum as f64
}

/// Best of `token_sort_ratio` and `token_set_ratio`.
pub fn token_ratio(a: &str, b: &str) -> f64 {
    token_sort_ratio(a, b).max(token_set_ratio(a, b))
}

/// `partial_ratio` on sorted tokens; any shared token scores 100.
pub fn partial_token_ratio(a: &str, b: &str) -> f64 {
    let split_a = sorted_tokens(a);
    let split_b = sorted_tokens(b);
    if split_a.is_empty() || split_b.is_empty() {
        return 0.0;
    }
    let ta: BTreeSet<&str> = split_a.iter().copied().collect();
    let tb: BTreeSet<&str> = split_b.iter().copied().collect();
    if ta.intersection(&tb).next().is_some() {
        return 100.0;
    }

    let result = partial_ratio(&split_a.join(" "), &split_b.join(" "));
    // Without repeated tokens the leftovers are the full token lists.
    if split_a.len() == ta.len() && split_b.len() == tb.len() {
        return result;
    }
    let diff_ab: Vec<&str> = ta.into_iter().collect();
    let diff_ba: Vec<&str> = tb.into_iter().collect();
    result.max(partial_ratio(&diff_ab.join(" "), &diff_ba.join(" ")))
}

/// Weighted ratio.
///
/// Strings of similar length are scored with `ratio` and the token scorers.
/// Once one string is at least 1.5x longer, partial scorers take over,
/// scaled down by 0.9 (or 0.6 from a length ratio of 8).
pub fn wratio(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }

    let len_ratio = len_a.max(len_b) as f64 / len_a.min(len_b) as f64;
    let end_ratio = ratio(a, b);
    if len_ratio < 1.5 {
        return end_ratio.max(token_ratio(a, b) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(a, b) * partial_scale);
    end_ratio.max(partial_token_ratio(a, b) * UNBASE_SCALE * partial_scale)
}
