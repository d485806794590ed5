use std::num::ParseIntError;

use actix_web::{dev::Payload, error::ResponseError, http::StatusCode, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::notifier::{ApiKey, DeviceId, API_KEY_LEN};

/// Name of the tail segment in hook route patterns.
pub const ARGS: &str = "args";

/// Credentials carried in the path of a hook URL:
/// `.../{api_key}` or `.../{api_key}/{device_id}`.
#[derive(Debug, Clone)]
pub struct HookRoute {
    pub key: ApiKey,
    pub device: Option<DeviceId>,
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("expected `<api key>` or `<api key>/<device id>`, got {0} path segments")]
    SegmentCount(usize),
    #[error("API key must be {} characters long, got {0}", API_KEY_LEN)]
    KeyLength(usize),
    #[error("device id must be an integer: {0}")]
    DeviceId(#[from] ParseIntError),
}

impl ResponseError for RouteError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl HookRoute {
    pub fn parse(args: &str) -> Result<Self, RouteError> {
        let segments: Vec<&str> = args.split('/').collect();
        let (key, device) = match segments.as_slice() {
            [key] => (*key, None),
            [key, device] => (*key, Some(*device)),
            _ => return Err(RouteError::SegmentCount(segments.len())),
        };

        let key = ApiKey::parse(key).ok_or_else(|| RouteError::KeyLength(key.len()))?;
        let device = match device {
            Some(device) => Some(DeviceId(device.parse()?)),
            None => None,
        };

        Ok(Self { key, device })
    }
}

impl FromRequest for HookRoute {
    type Error = RouteError;
    type Future = Ready<Result<Self, Self::Error>>;
    type Config = ();

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::parse(req.match_info().query(ARGS)))
    }
}
