use serde::{Deserialize, Serialize};

use crate::accounts::models::Profile;
use crate::auth::dto::PublicUser;

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: PublicUser,
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    pub email: String,
}
