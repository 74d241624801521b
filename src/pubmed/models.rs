/// Identifiers returned by one ESearch query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Total number of matches reported by the server
    pub count: u64,
    /// Result cap the server applied
    pub ret_max: u64,
    /// Matching PMIDs in response order, trimmed
    pub ids: Vec<String>,
}

impl SearchOutcome {
    /// `true` when the server found more matches than it returned
    pub fn is_truncated(&self) -> bool {
        self.count > self.ret_max
    }
}
