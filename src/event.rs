/// Length of the abbreviated commit id shown in notifications.
const SHORT_ID_LEN: usize = 7;
/// Longest commit summary rendered without truncation.
const SUMMARY_MAX: usize = 60;
const ELLIPSIS: &str = "(...)";

/// Provider-agnostic push notification, built once per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushEvent {
    pub pusher_name: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    pub author: String,
    pub id: String,
    pub message: String,
}

impl Commit {
    /// First seven characters of the revision id, or the whole id if shorter.
    pub fn short_id(&self) -> &str {
        truncate(&self.id, SHORT_ID_LEN)
    }

    /// First line of the message, ellipsized to at most 60 characters.
    pub fn summary(&self) -> String {
        let line = self.message.lines().next().unwrap_or("");
        ellipsize(line, SUMMARY_MAX)
    }
}

/// Cuts `s` to at most `n` characters. Never pads.
fn truncate(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Strings longer than `n` characters become their first `n - 5` characters
/// followed by `(...)`, so the result is exactly `n` characters long.
fn ellipsize(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        return s.to_owned();
    }
    let mut out = truncate(s, n - ELLIPSIS.len()).to_owned();
    out.push_str(ELLIPSIS);
    out
}
