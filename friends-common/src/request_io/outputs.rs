use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::friendship_log::FriendshipLog;
use crate::models::profile::Profile;

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct OutputProfileId {
    pub profile_id: Uuid,
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputProfileList {
    pub profiles: Vec<Profile>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputFriendList {
    pub friends: Vec<Profile>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputFriendshipLogList {
    pub logs: Vec<FriendshipLog>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct OutputFriendshipStatus {
    pub status: &'static str,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OutputErrorResponse {
    pub err_type: String,
    pub err_message: String,
}
