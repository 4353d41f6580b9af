use std::time::Duration;

use tracing::{debug, error, warn};

use crate::moderation::{Moderator, Removal, Verdict};
use crate::platform::{ApiError, BotApi, Member};

/// Pause after a failed `getUpdates` before asking again
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Offset of the next update to request. Absent until the first update
/// arrives, meaning "wherever the server currently is".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(Option<i64>);

impl Cursor {
    pub fn offset(self) -> Option<i64> {
        self.0
    }

    /// Move past `update_id`. Never moves backwards.
    pub fn advance(&mut self, update_id: i64) {
        let next = update_id.saturating_add(1);
        if self.0.map_or(true, |current| next > current) {
            self.0 = Some(next);
        }
    }
}

/// Fetch one batch starting at `cursor` and moderate every new member in it.
///
/// Returns the advanced cursor. On error nothing was processed and the
/// caller keeps its previous cursor.
pub async fn poll_once<A: BotApi + ?Sized>(
    api: &A,
    moderator: &Moderator<'_, A>,
    mut cursor: Cursor,
) -> Result<Cursor, ApiError> {
    let updates = api.get_updates(cursor.offset()).await?;
    if !updates.is_empty() {
        debug!("Received {} update(s)", updates.len());
    }

    for update in updates {
        cursor.advance(update.update_id);

        let Some(message) = update.message else {
            continue;
        };
        for member in &message.new_chat_members {
            let verdict = moderator.evaluate(member, message.message_id).await;
            if let Verdict::Removed(removal) = verdict {
                log_removal(member, message.message_id, &removal);
            }
        }
    }

    Ok(cursor)
}

fn log_removal(member: &Member, message_id: i64, removal: &Removal) {
    match &removal.kick {
        Ok(body) => debug!("kickChatMember {}: {}", member.id, body),
        Err(e) => warn!("Failed to kick member {}: {}", member.id, e),
    }
    match &removal.delete {
        Ok(body) => debug!("deleteMessage {}: {}", message_id, body),
        Err(e) => warn!("Failed to delete message {}: {}", message_id, e),
    }
}

/// Poll forever. Failed polls are logged and retried after `retry_delay`
/// without moving the cursor.
pub async fn run<A: BotApi + ?Sized>(api: &A, moderator: Moderator<'_, A>, retry_delay: Duration) {
    let mut cursor = Cursor::default();

    loop {
        match poll_once(api, &moderator, cursor).await {
            Ok(next) => cursor = next,
            Err(e) => {
                error!("Polling for updates failed: {}", e);
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}
