//! Version specifier heuristics for package.json entries
//!
//! The update filter never solves semver ranges. It only needs to answer
//! three questions about a specifier string:
//! - Is it a prerelease (`2.0.0-beta`)?
//! - Is it a reference outside the registry (`git+https://...`, `user/repo`, `file:../pkg`)?
//! - What is its leading major number?

use regex::Regex;
use std::sync::LazyLock;

/// Specifier that requests whatever the registry considers latest
pub const WILDCARD: &str = "*";

/// Sentinel reported as `latest` for locally linked packages
pub const LINKED: &str = "linked";

/// Major number used when a specifier cannot be interpreted
pub const UNPARSEABLE_MAJOR: i64 = -1;

static NON_REGISTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^git|/").expect("valid non-registry pattern"));

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid non-digit pattern"));

/// Returns true if the specifier carries a prerelease marker
pub fn is_prerelease(spec: &str) -> bool {
    spec.contains('-')
}

/// Returns true if the specifier points at a git repository or a path
pub fn is_non_registry(spec: &str) -> bool {
    NON_REGISTRY.is_match(spec)
}

/// Returns true if the specifier is exactly the wildcard
pub fn is_wildcard(spec: &str) -> bool {
    spec == WILDCARD
}

/// Extract the leading major number of a specifier.
///
/// Only the first non-digit character of the leading segment is dropped, so
/// `^1.2.3` and `~1.2` yield `1` while `>=1.0.0` yields [`UNPARSEABLE_MAJOR`].
/// A segment that is empty after stripping counts as `0` (this is what `*`
/// becomes). One leading sign is accepted (`^+5` yields `5`) and majors
/// beyond `i64` saturate.
pub fn major_version(spec: &str) -> i64 {
    let head = spec.split('.').next().unwrap_or_default().trim();
    let stripped = NON_DIGIT.replacen(head, 1, "");
    let number = stripped.trim();

    if number.is_empty() {
        return 0;
    }

    let (negative, digits) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number.strip_prefix('+').unwrap_or(number)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return UNPARSEABLE_MAJOR;
    }

    // Only overflow can fail here
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Strip range operators from a simple specifier (`^1.2.3` -> `1.2.3`)
pub fn base_version(spec: &str) -> &str {
    spec.trim()
        .trim_start_matches(['^', '~', '>', '<', '=', 'v', ' '])
}
