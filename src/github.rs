use serde::Deserialize;

use crate::{event, provider::nullable};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Repository {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub owner: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(deserialize_with = "nullable")]
    pub author: Author,
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    #[serde(deserialize_with = "nullable")]
    pub repository: Repository,
    #[serde(deserialize_with = "nullable")]
    pub pusher: User,
    #[serde(deserialize_with = "nullable")]
    pub commits: Vec<Commit>,
}

impl From<Commit> for event::Commit {
    fn from(commit: Commit) -> Self {
        let Author { username, name } = commit.author;
        Self {
            author: if username.is_empty() { name } else { username },
            id: commit.id,
            message: commit.message,
        }
    }
}

impl From<PushPayload> for event::PushEvent {
    fn from(payload: PushPayload) -> Self {
        Self {
            pusher_name: payload.pusher.name,
            repo_owner: payload.repository.owner.name,
            repo_name: payload.repository.name,
            commits: payload.commits.into_iter().map(Into::into).collect(),
        }
    }
}
