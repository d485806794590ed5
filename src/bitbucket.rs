use serde::Deserialize;

use crate::{event, provider::nullable};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Repository {
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
    #[serde(deserialize_with = "nullable")]
    pub owner: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(deserialize_with = "nullable")]
    pub author: String,
    #[serde(deserialize_with = "nullable")]
    pub node: String,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}

/// Body of a BitBucket "POST" service hook.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    #[serde(deserialize_with = "nullable")]
    pub user: String,
    #[serde(deserialize_with = "nullable")]
    pub repository: Repository,
    #[serde(deserialize_with = "nullable")]
    pub commits: Vec<Commit>,
}

impl From<PushPayload> for event::PushEvent {
    fn from(payload: PushPayload) -> Self {
        Self {
            pusher_name: payload.user,
            repo_owner: payload.repository.owner,
            repo_name: payload.repository.slug,
            commits: payload
                .commits
                .into_iter()
                .map(|commit| event::Commit {
                    author: commit.author,
                    id: commit.node,
                    message: commit.message,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_hook_payload() {
        let payload: PushPayload = serde_json::from_str(
            r#"{
                "canon_url": "https://bitbucket.org",
                "user": "marcus",
                "repository": {"slug": "project-x", "owner": "marcus", "website": ""},
                "commits": [
                    {"author": "marcus", "node": "620ade18607a", "message": "Added some more things to somefile.py\n",
                     "raw_author": "Marcus Bertrand <marcus@somedomain.com>"}
                ]
            }"#,
        )
        .unwrap();
        let event = event::PushEvent::from(payload);
        assert_eq!(event.pusher_name, "marcus");
        assert_eq!(event.repo_owner, "marcus");
        assert_eq!(event.repo_name, "project-x");
        assert_eq!(
            event.commits,
            vec![event::Commit {
                author: "marcus".into(),
                id: "620ade18607a".into(),
                message: "Added some more things to somefile.py\n".into(),
            }]
        );
    }

    #[test]
    fn missing_commits_decode_empty() {
        let payload: PushPayload =
            serde_json::from_str(r#"{"user":"u","repository":{"slug":"s","owner":"o"}}"#).unwrap();
        assert!(event::PushEvent::from(payload).commits.is_empty());
    }
}
