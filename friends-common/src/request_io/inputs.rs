use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputProfile {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct InputProfileId {
    pub profile_id: Uuid,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputProfileSearch {
    pub search: Option<String>,
}

/// The two sides of a connect/disconnect request. `actor_id` is the profile
/// the action was taken on behalf of; the orientation is preserved in the
/// audit log.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct InputFriendshipPair {
    pub actor_id: Uuid,
    pub other_id: Uuid,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct InputUserId {
    pub user_id: Uuid,
}
