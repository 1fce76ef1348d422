use serde::{Deserialize, Serialize};

/// Stored profile. Field names on the wire match the `PROFILE` key layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(rename = "avatar", default = "default_index")]
    pub avatar_index: i32, // -1 = default avatar
    #[serde(default)]
    pub verified: bool,
    #[serde(rename = "bgIndex", default = "default_index")]
    pub background_index: i32, // -1 = default background
}

fn default_index() -> i32 {
    -1
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            mobile: String::new(),
            avatar_index: default_index(),
            verified: false,
            background_index: default_index(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

/// One step on the milestone path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayNode {
    pub day: u32,
    pub unlocked: bool,
}
