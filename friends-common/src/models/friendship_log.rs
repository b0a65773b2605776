use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::schema::friendship_logs;

/// Audit action recorded for a friendship event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogAction {
    Started,
    Ended,
}

impl LogAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogAction::Started => "started",
            LogAction::Ended => "ended",
        }
    }
}

/// Append-only audit entry. `user_a_id`/`user_b_id` keep the actor/other
/// orientation of the request that produced the entry; they are never
/// canonicalized the way `friendships` rows are.
#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = friendship_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FriendshipLog {
    pub id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub action: String,
    pub created_at: SystemTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = friendship_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFriendshipLog<'a> {
    pub id: Uuid,
    pub user_a_id: Uuid,
    pub user_b_id: Uuid,
    pub action: &'a str,
    pub created_at: SystemTime,
}
