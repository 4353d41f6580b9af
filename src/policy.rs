use crate::platform::Member;

/// Upper bound on the byte length of a member's first and last name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamePolicy {
    limit: usize,
}

impl NamePolicy {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True when either name is strictly longer than the limit.
    /// A missing last name counts as empty.
    pub fn is_violation(&self, member: &Member) -> bool {
        let last_name_len = member.last_name.as_deref().map_or(0, str::len);
        member.first_name.len() > self.limit || last_name_len > self.limit
    }
}
