//! Expand compact SLURM node-list notation into hostnames.
//!
//! `node[01-03,07]`-style expressions come from `SLURM_JOB_NODELIST`.
//! Expansion never fails: input without any recognizable bracket group
//! degrades to the loopback fallback so downstream consumers always
//! have at least one target.

use once_cell::sync::Lazy;
use regex::Regex;

/// Returned when the expression contains no bracket group at all.
pub const FALLBACK_HOST: &str = "127.0.0.1";

/// One `prefix[spec]` group. Groups are separated by commas or
/// newlines; neither can appear inside a prefix.
static GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\s,\[\]]+)\[([^\]]+)\]").unwrap());

/// First `low-high` range inside a bracket spec.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)-(\d+)").unwrap());

/// Expand a node-list expression into an ordered hostname list.
///
/// Per bracket group: a spec containing a `low-high` range expands to
/// every integer in `[low, high]`, zero-padded to the width of the low
/// bound (so `node[01-03]` keeps its padding). A spec with no range
/// anywhere emits each comma-separated token verbatim appended to the
/// prefix. Mixing singles and ranges in one group is not supported; the
/// first range wins and the other entries are ignored.
pub fn expand(node_list: &str) -> Vec<String> {
    let mut hosts = Vec::new();

    for group in GROUP_RE.captures_iter(node_list) {
        let prefix = &group[1];
        let spec = &group[2];

        if spec.contains('-') {
            if let Some(range) = RANGE_RE.captures(spec) {
                let low_token = &range[1];
                let low: u64 = match low_token.parse() {
                    Ok(n) => n,
                    Err(_) => continue,
                };
                let high: u64 = match range[2].parse() {
                    Ok(n) => n,
                    Err(_) => continue,
                };
                let width = low_token.len();
                for n in low..=high {
                    hosts.push(format!("{prefix}{n:0width$}"));
                }
            }
        } else {
            for token in spec.split(',') {
                hosts.push(format!("{prefix}{token}"));
            }
        }
    }

    if hosts.is_empty() {
        tracing::debug!(
            node_list,
            "no bracket group in node list, falling back to loopback"
        );
        hosts.push(FALLBACK_HOST.to_string());
    }

    hosts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_padded_range() {
        assert_eq!(expand("node[01-03]"), vec!["node01", "node02", "node03"]);
    }

    #[test]
    fn test_expand_mixed_groups() {
        assert_eq!(
            expand("nodeA[5],nodeB[10-12]"),
            vec!["nodeA5", "nodeB10", "nodeB11", "nodeB12"]
        );
    }

    #[test]
    fn test_expand_garbage_falls_back() {
        assert_eq!(expand("garbage"), vec![FALLBACK_HOST]);
        assert_eq!(expand(""), vec![FALLBACK_HOST]);
    }

    #[test]
    fn test_expand_range_length() {
        let hosts = expand("gpu[7-23]");
        assert_eq!(hosts.len(), 23 - 7 + 1);
        assert_eq!(hosts.first().map(String::as_str), Some("gpu7"));
        assert_eq!(hosts.last().map(String::as_str), Some("gpu23"));
    }

    #[test]
    fn test_expand_singles_preserve_padding() {
        assert_eq!(expand("node[01,07]"), vec!["node01", "node07"]);
    }

    #[test]
    fn test_expand_range_wins_over_singles() {
        // Mixed groups are unsupported; the range takes the whole group.
        assert_eq!(expand("node[1,5-6]"), vec!["node5", "node6"]);
    }

    #[test]
    fn test_expand_newline_separated_groups() {
        assert_eq!(expand("a[1]\nb[2]"), vec!["a1", "b2"]);
    }

    #[test]
    fn test_expand_order_is_stable() {
        assert_eq!(
            expand("b[2],a[1],c[3-4]"),
            vec!["b2", "a1", "c3", "c4"]
        );
    }
}
