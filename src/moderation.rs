use tracing::info;

use crate::platform::{ApiError, BotApi, Member};
use crate::policy::NamePolicy;

/// Results of the two calls made against a violating member.
/// Neither is retried; the caller only logs them.
#[derive(Debug)]
pub struct Removal {
    pub kick: Result<String, ApiError>,
    pub delete: Result<String, ApiError>,
}

#[derive(Debug)]
pub enum Verdict {
    Allowed,
    Removed(Removal),
}

/// Applies the name policy to joining members and removes violators
pub struct Moderator<'a, A: BotApi + ?Sized> {
    api: &'a A,
    policy: NamePolicy,
}

impl<'a, A: BotApi + ?Sized> Moderator<'a, A> {
    pub fn new(api: &'a A, policy: NamePolicy) -> Self {
        Self { api, policy }
    }

    /// Kick `member` and delete the join message when the policy is violated.
    /// The delete is attempted even if the kick failed.
    pub async fn evaluate(&self, member: &Member, message_id: i64) -> Verdict {
        if !self.policy.is_violation(member) {
            return Verdict::Allowed;
        }

        info!("Kicking {}", member.describe());
        let kick = self.api.kick_chat_member(member.id).await;
        let delete = self.api.delete_message(message_id).await;
        Verdict::Removed(Removal { kick, delete })
    }
}
