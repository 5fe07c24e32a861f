//! Small UI helpers: compact counts, truncation.

pub fn human_count(n: u64) -> String {
    const K: f64 = 1000.0;
    let v = n as f64;
    if v < K { return format!("{n}"); }
    let k = v / K;
    if k < K { return format!("{k:.1}k"); }
    let m = k / K;
    if m < K { return format!("{m:.1}M"); }
    format!("{:.2}B", m / K)
}

// Char-based so multi-byte page paths never split inside a code point
pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max { return s.to_string(); }
    if max <= 3 { return "...".into(); }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(n - right).collect();
    format!("{head}...{tail}")
}
