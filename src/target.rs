use std::fmt;

/// A URL ready to be requested, with the configured query parameter
/// already appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTarget(String);

impl RequestTarget {
    pub fn new(raw: &str, query: &str) -> Self {
        let raw = raw.trim();
        if query.is_empty() {
            return Self(raw.to_string());
        }

        let separator = if raw.contains('?') { '&' } else { '?' };
        Self(format!("{}{}{}", raw, separator, query))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a single GET produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    Code(u16),
    /// No response was obtained at all.
    Failed,
}

impl StatusOutcome {
    /// Status written to the log; `0` is the failure sentinel.
    pub const FAILURE_SENTINEL: u16 = 0;

    pub fn code(&self) -> u16 {
        match self {
            StatusOutcome::Code(code) => *code,
            StatusOutcome::Failed => Self::FAILURE_SENTINEL,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StatusOutcome::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub target: RequestTarget,
    pub outcome: StatusOutcome,
}

impl CheckResult {
    pub fn new(target: RequestTarget, outcome: StatusOutcome) -> Self {
        Self { target, outcome }
    }
}
