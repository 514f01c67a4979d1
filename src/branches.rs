/// Marker `git branch` puts in front of the checked out branch.
pub const CURRENT_BRANCH_MARKER: char = '*';

/// Turn the raw output of `git branch` into branch names, in input order.
///
/// Every marker on a line is dropped, then the line is trimmed; lines left
/// empty are skipped. Names are neither deduplicated nor validated.
pub fn parse_branches(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.replace(CURRENT_BRANCH_MARKER, ""))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
