use serde::Deserialize;

/// `GET /api/v1/users/web_profile_info/?username=`
#[derive(Debug, Clone, Deserialize)]
pub struct WebProfileResponse {
    #[serde(default)]
    pub data: Option<WebProfileData>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebProfileData {
    #[serde(default)]
    pub user: Option<RawUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    pub edge_followed_by: Count,
    pub edge_follow: Count,
    pub edge_owner_to_timeline_media: Count,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Count {
    pub count: u64,
}

/// Public attributes of one Instagram profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub full_name: String,
    pub biography: String,
    pub followers: u64,
    pub followees: u64,
    pub media_count: u64,
    pub is_private: bool,
}

impl From<RawUser> for Profile {
    fn from(u: RawUser) -> Self {
        Self {
            username: u.username,
            full_name: u.full_name.unwrap_or_default(),
            biography: u.biography.unwrap_or_default(),
            followers: u.edge_followed_by.count,
            followees: u.edge_follow.count,
            media_count: u.edge_owner_to_timeline_media.count,
            is_private: u.is_private,
        }
    }
}
