// Parsing of the question titles into roles and candidates.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use snafu::prelude::*;

use crate::split::*;

// The question-title template is fixed by the survey: the role name follows
// "position of", the candidate name is the <strong> markup at the end.
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"position of (.*)\. If.*<strong>(.*)</strong>").expect("valid regex")
});

/// The columns of one role: a contiguous range of the trimmed header, with the
/// candidate names in column order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoleColumns {
    pub role: String,
    /// Index of the first column of this role, inclusive.
    pub start: usize,
    /// Index one past the last column of this role.
    pub end: usize,
    pub candidates: Vec<String>,
}

/// Extracts the (role, candidate) pair named by a question title.
pub fn parse_title(title: &str) -> Option<(String, String)> {
    let caps = TITLE_RE.captures(title)?;
    let role = caps.get(1)?.as_str().trim();
    let candidate = caps.get(2)?.as_str().trim();
    Some((role.to_string(), candidate.to_string()))
}

/// Groups the trimmed header into roles, in order of first appearance. All the columns
/// of a role must form a single contiguous run: a run that reopens after another role
/// has started is rejected rather than silently merged.
pub fn extract_roles(header: &[String]) -> SplitResult<Vec<RoleColumns>> {
    let mut roles: Vec<RoleColumns> = Vec::new();
    for (column, title) in header.iter().enumerate() {
        let title = title.as_str();
        let (role, candidate) = parse_title(title).context(TitleParseSnafu { column, title })?;
        debug!(
            "extract_roles: column: {:?} role: {:?} candidate: {:?}",
            column, role, candidate
        );
        match roles.last_mut() {
            Some(last) if last.role == role => {
                last.end += 1;
                last.candidates.push(candidate);
                continue;
            }
            _ => {}
        }
        if let Some(prev) = roles.iter().find(|r| r.role == role) {
            return NonContiguousRoleSnafu {
                role,
                column,
                last: prev.end - 1,
            }
            .fail();
        }
        roles.push(RoleColumns {
            role,
            start: column,
            end: column + 1,
            candidates: vec![candidate],
        });
    }
    Ok(roles)
}
