//! Command admission filter.

/// Decides which executed commands get recorded for digesting.
///
/// Exactly one of the two prefix lists is consulted. A non-empty blacklist
/// wins: only matching commands are recorded. Otherwise the whitelist
/// excludes matching commands and everything else is recorded. Matching is
/// case-insensitive prefix matching against the full command line, so a
/// `time` entry also covers `/time set day`.
#[derive(Debug, Clone, Default)]
pub struct CommandFilter {
    whitelist: Vec<String>,
    blacklist: Vec<String>,
    log_ops: bool,
}

impl CommandFilter {
    /// Build a filter from configured prefix lists.
    ///
    /// Entries are normalized once here: lowercased and given a leading
    /// slash when missing, so `TP` and `/tp` configure the same prefix.
    pub fn new(whitelist: &[String], blacklist: &[String], log_ops: bool) -> Self {
        Self {
            whitelist: whitelist.iter().map(|e| normalize_prefix(e)).collect(),
            blacklist: blacklist.iter().map(|e| normalize_prefix(e)).collect(),
            log_ops,
        }
    }

    /// Returns true when the command should be recorded.
    ///
    /// Commands from operators are skipped entirely unless operator
    /// logging is enabled.
    pub fn should_log(&self, is_op: bool, command: &str) -> bool {
        if is_op && !self.log_ops {
            return false;
        }

        let command = command.to_lowercase();
        if !self.blacklist.is_empty() {
            return self.blacklist.iter().any(|p| command.starts_with(p.as_str()));
        }
        !self.whitelist.iter().any(|p| command.starts_with(p.as_str()))
    }
}

fn normalize_prefix(entry: &str) -> String {
    let entry = entry.to_lowercase();
    if entry.starts_with('/') {
        entry
    } else {
        format!("/{}", entry)
    }
}
