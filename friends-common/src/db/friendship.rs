use diesel::{dsl, BoolExpressionMethods, ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use std::time::SystemTime;
use uuid::Uuid;

use crate::db::{DaoError, DbAsyncPool};
use crate::models::friendship::{Friendship, NewFriendship};
use crate::models::friendship_log::{FriendshipLog, LogAction, NewFriendshipLog};
use crate::models::profile::Profile;

use crate::schema::friendship_logs as friendship_log_fields;
use crate::schema::friendship_logs::dsl::friendship_logs;
use crate::schema::friendships as friendship_fields;
use crate::schema::friendships::dsl::friendships;
use crate::schema::profiles as profile_fields;
use crate::schema::profiles::dsl::profiles;

/// Result of a connect request. `AlreadyActive` means the pair was already
/// friends and nothing was written (no log entry either).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    Created,
    Reactivated,
    AlreadyActive,
}

/// Result of a disconnect request. `NotFriends` means no active relationship
/// existed and nothing was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectOutcome {
    Ended,
    NotFriends,
}

/// Orders a pair of profile IDs so the same two profiles always map to the
/// same `friendships` row regardless of argument order. Applied at write
/// time only; reads must still match either orientation because historical
/// rows may have been stored under either assignment.
pub fn canonicalize_pair(first: Uuid, second: Uuid) -> (Uuid, Uuid) {
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    /// Establishes or reactivates a friendship between two profiles. The
    /// friendship row write and the audit log append happen in a single
    /// transaction; a failed log append rolls back the row write.
    pub async fn connect(
        &self,
        actor_id: Uuid,
        other_id: Uuid,
    ) -> Result<ConnectOutcome, DaoError> {
        if actor_id == other_id {
            return Err(DaoError::InvalidPair(
                "A profile cannot befriend itself",
            ));
        }

        let mut db_connection = self.db_async_pool.get().await?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                Box::pin(async move {
                    let current_time = SystemTime::now();

                    let existing_rows = friendships
                        .filter(
                            friendship_fields::user_a_id
                                .eq(actor_id)
                                .and(friendship_fields::user_b_id.eq(other_id))
                                .or(friendship_fields::user_a_id
                                    .eq(other_id)
                                    .and(friendship_fields::user_b_id.eq(actor_id))),
                        )
                        .order(friendship_fields::started_at.desc())
                        .load::<Friendship>(conn)
                        .await?;

                    if existing_rows.len() > 1 {
                        log::warn!(
                            "Found {} friendship rows for pair ({actor_id}, {other_id}); \
                             using the most recently started",
                            existing_rows.len(),
                        );
                    }

                    match existing_rows.into_iter().next() {
                        Some(row) if row.ended_at.is_none() => Ok(ConnectOutcome::AlreadyActive),
                        Some(row) => {
                            dsl::update(friendships.find(row.id))
                                .set((
                                    friendship_fields::started_at.eq(current_time),
                                    friendship_fields::ended_at.eq(None::<SystemTime>),
                                ))
                                .execute(conn)
                                .await?;

                            append_log(conn, actor_id, other_id, LogAction::Started, current_time)
                                .await?;

                            Ok(ConnectOutcome::Reactivated)
                        }
                        None => {
                            let (user_a_id, user_b_id) = canonicalize_pair(actor_id, other_id);

                            let new_friendship = NewFriendship {
                                id: Uuid::now_v7(),
                                user_a_id,
                                user_b_id,
                                started_at: current_time,
                                ended_at: None,
                            };

                            // Upsert against the unique pair index so two
                            // concurrent first-time connects cannot create
                            // duplicate rows
                            dsl::insert_into(friendships)
                                .values(&new_friendship)
                                .on_conflict((
                                    friendship_fields::user_a_id,
                                    friendship_fields::user_b_id,
                                ))
                                .do_update()
                                .set((
                                    friendship_fields::started_at.eq(current_time),
                                    friendship_fields::ended_at.eq(None::<SystemTime>),
                                ))
                                .execute(conn)
                                .await?;

                            append_log(conn, actor_id, other_id, LogAction::Started, current_time)
                                .await?;

                            Ok(ConnectOutcome::Created)
                        }
                    }
                })
            })
            .await
    }

    /// Ends the active friendship between two profiles, if one exists. The
    /// row is kept (with `ended_at` set) so a later connect reactivates it.
    pub async fn disconnect(
        &self,
        actor_id: Uuid,
        other_id: Uuid,
    ) -> Result<DisconnectOutcome, DaoError> {
        let mut db_connection = self.db_async_pool.get().await?;

        db_connection
            .build_transaction()
            .run::<_, DaoError, _>(|conn| {
                Box::pin(async move {
                    let current_time = SystemTime::now();

                    let active_row = friendships
                        .filter(
                            friendship_fields::user_a_id
                                .eq(actor_id)
                                .and(friendship_fields::user_b_id.eq(other_id))
                                .or(friendship_fields::user_a_id
                                    .eq(other_id)
                                    .and(friendship_fields::user_b_id.eq(actor_id))),
                        )
                        .filter(friendship_fields::ended_at.is_null())
                        .order(friendship_fields::started_at.desc())
                        .load::<Friendship>(conn)
                        .await?;

                    let Some(row) = active_row.into_iter().next() else {
                        return Ok(DisconnectOutcome::NotFriends);
                    };

                    dsl::update(friendships.find(row.id))
                        .set(friendship_fields::ended_at.eq(current_time))
                        .execute(conn)
                        .await?;

                    append_log(conn, actor_id, other_id, LogAction::Ended, current_time).await?;

                    Ok(DisconnectOutcome::Ended)
                })
            })
            .await
    }

    /// Counterpart profiles of every active friendship containing `user_id`,
    /// recomputed from the store on every call.
    pub async fn get_active_friends_of(&self, user_id: Uuid) -> Result<Vec<Profile>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;

        let rows = friendships
            .filter(
                friendship_fields::user_a_id
                    .eq(user_id)
                    .or(friendship_fields::user_b_id.eq(user_id)),
            )
            .filter(friendship_fields::ended_at.is_null())
            .load::<Friendship>(&mut conn)
            .await?;

        let friend_ids = rows
            .iter()
            .map(|f| {
                if f.user_a_id == user_id {
                    f.user_b_id
                } else {
                    f.user_a_id
                }
            })
            .collect::<Vec<_>>();

        if friend_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(profiles
            .filter(profile_fields::id.eq_any(friend_ids))
            .order(profile_fields::full_name.asc())
            .load::<Profile>(&mut conn)
            .await?)
    }

    /// Audit entries where `user_id` appears in either role, newest first.
    /// Same-instant entries fall back to a descending ID ordering since the
    /// store does not guarantee sub-timestamp insert ordering.
    pub async fn get_logs_for(&self, user_id: Uuid) -> Result<Vec<FriendshipLog>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;

        Ok(friendship_logs
            .filter(
                friendship_log_fields::user_a_id
                    .eq(user_id)
                    .or(friendship_log_fields::user_b_id.eq(user_id)),
            )
            .order((
                friendship_log_fields::created_at.desc(),
                friendship_log_fields::id.desc(),
            ))
            .load::<FriendshipLog>(&mut conn)
            .await?)
    }
}

async fn append_log(
    conn: &mut diesel_async::AsyncPgConnection,
    actor_id: Uuid,
    other_id: Uuid,
    action: LogAction,
    created_at: SystemTime,
) -> Result<(), diesel::result::Error> {
    let new_log = NewFriendshipLog {
        id: Uuid::now_v7(),
        user_a_id: actor_id,
        user_b_id: other_id,
        action: action.as_str(),
        created_at,
    };

    dsl::insert_into(friendship_logs)
        .values(&new_log)
        .execute(conn)
        .await?;

    Ok(())
}
