use std::time::Duration;

use actix_web::http::StatusCode;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use super::{ApiKey, DeviceId, Note, NoteService};

const DEVICE_LIST_LIMIT: usize = 1 << 20;

#[derive(Debug, thiserror::Error)]
pub enum PushbulletError {
    #[error("failed to send request to Pushbullet: {0}")]
    Request(String),
    #[error("Pushbullet API returned {0}")]
    Status(StatusCode),
    #[error("failed to decode Pushbullet response: {0}")]
    Body(String),
    #[error("Pushbullet API did not answer within {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Deserialize)]
struct DeviceList {
    #[serde(default)]
    devices: Vec<DeviceEntry>,
}

#[derive(Debug, Deserialize)]
struct DeviceEntry {
    id: i64,
}

#[derive(Debug, Serialize)]
struct PushNote<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    device_id: i64,
    title: &'a str,
    body: &'a str,
}

/// Client for the Pushbullet device and push endpoints.
#[derive(Clone)]
pub struct Pushbullet {
    http: awc::Client,
    base_url: String,
}

impl Pushbullet {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = awc::Client::builder().timeout(timeout).finish();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn try_devices(&self, key: &ApiKey) -> Result<Vec<DeviceId>, PushbulletError> {
        let mut resp = self
            .http
            .get(format!("{}/api/devices", self.base_url))
            .basic_auth(key.unsecure(), Some(""))
            .send()
            .await
            .map_err(|err| PushbulletError::Request(err.to_string()))?;

        if !resp.status().is_success() {
            return Err(PushbulletError::Status(resp.status()));
        }

        let list: DeviceList = resp
            .json()
            .limit(DEVICE_LIST_LIMIT)
            .await
            .map_err(|err| PushbulletError::Body(err.to_string()))?;
        Ok(list.devices.into_iter().map(|d| DeviceId(d.id)).collect())
    }

    async fn try_push_note(
        &self,
        key: &ApiKey,
        device: DeviceId,
        note: &Note,
    ) -> Result<(), PushbulletError> {
        let form = PushNote {
            kind: "note",
            device_id: device.0,
            title: note.title,
            body: &note.body,
        };

        let resp = self
            .http
            .post(format!("{}/api/pushes", self.base_url))
            .basic_auth(key.unsecure(), Some(""))
            .send_form(&form)
            .await
            .map_err(|err| PushbulletError::Request(err.to_string()))?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(PushbulletError::Status(resp.status()))
        }
    }
}

impl NoteService for Pushbullet {
    fn devices<'a>(
        &'a self,
        key: &'a ApiKey,
    ) -> LocalBoxFuture<'a, Result<Vec<DeviceId>, PushbulletError>> {
        Box::pin(self.try_devices(key))
    }

    fn push_note<'a>(
        &'a self,
        key: &'a ApiKey,
        device: DeviceId,
        note: &'a Note,
    ) -> LocalBoxFuture<'a, Result<(), PushbulletError>> {
        Box::pin(self.try_push_note(key, device, note))
    }
}
