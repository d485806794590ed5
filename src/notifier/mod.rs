use std::{fmt, time::Duration};

pub mod message;
mod pushbullet;
mod status;
#[cfg(test)]
pub mod testing;

pub use self::{
    pushbullet::{Pushbullet, PushbulletError},
    status::Status,
};

use futures::future::{join_all, LocalBoxFuture};
use secstr::SecUtf8;

/// Length every Pushbullet access token has.
pub const API_KEY_LEN: usize = 32;

/// Caller's Pushbullet access token. Never printed.
#[derive(Debug, Clone)]
pub struct ApiKey(SecUtf8);

impl ApiKey {
    /// Accepts any string of exactly [`API_KEY_LEN`] bytes.
    pub fn parse(key: &str) -> Option<Self> {
        if key.len() == API_KEY_LEN {
            Some(Self(SecUtf8::from(key.to_owned())))
        } else {
            None
        }
    }

    pub fn unsecure(&self) -> &str {
        self.0.unsecure()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub i64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A titled text push.
#[derive(Debug, Clone)]
pub struct Note {
    pub title: &'static str,
    pub body: String,
}

/// Remote notification delivery API.
pub trait NoteService {
    fn devices<'a>(
        &'a self,
        key: &'a ApiKey,
    ) -> LocalBoxFuture<'a, Result<Vec<DeviceId>, PushbulletError>>;

    fn push_note<'a>(
        &'a self,
        key: &'a ApiKey,
        device: DeviceId,
        note: &'a Note,
    ) -> LocalBoxFuture<'a, Result<(), PushbulletError>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("notification service is unavailable")]
    UpstreamUnavailable(#[source] PushbulletError),
    #[error("device {0} is not registered under this key")]
    DeviceNotFound(DeviceId),
    #[error("all {attempted} delivery attempts failed")]
    AllDeliveriesFailed { attempted: usize },
}

/// Sends `note` to every device registered under `key`, or only to `target`.
///
/// A key without devices is a successful no-op. Every selected device is
/// tried concurrently and the call succeeds if at least one delivery does.
pub async fn dispatch(
    notes: &dyn NoteService,
    key: &ApiKey,
    target: Option<DeviceId>,
    note: &Note,
    timeout: Duration,
) -> Result<DeliveryReport, DispatchError> {
    let devices = match actix_rt::time::timeout(timeout, notes.devices(key)).await {
        Ok(Ok(devices)) => devices,
        Ok(Err(err)) => {
            tracing::error!("Failed to list devices: {}", err);
            return Err(DispatchError::UpstreamUnavailable(err));
        }
        Err(_) => {
            tracing::error!("Listing devices timed out after {:?}", timeout);
            return Err(DispatchError::UpstreamUnavailable(PushbulletError::Timeout(
                timeout,
            )));
        }
    };

    if devices.is_empty() {
        tracing::info!("No devices registered, nothing to deliver");
        return Ok(DeliveryReport::default());
    }

    let selected: Vec<DeviceId> = devices
        .into_iter()
        .filter(|device| target.map_or(true, |target| target == *device))
        .collect();
    if let Some(target) = target {
        if selected.is_empty() {
            return Err(DispatchError::DeviceNotFound(target));
        }
    }

    let attempts = selected.iter().map(|&device| async move {
        let push = notes.push_note(key, device, note);
        let status = match actix_rt::time::timeout(timeout, push).await {
            Ok(res) => Status::from(res),
            Err(_) => Status::Failed(PushbulletError::Timeout(timeout)),
        };
        if !status.is_delivered() {
            tracing::warn!(device = device.0, "Push to device {} {}", device, status);
        }
        status
    });
    let statuses = join_all(attempts).await;

    let report = DeliveryReport {
        attempted: statuses.len(),
        delivered: statuses.iter().filter(|s| s.is_delivered()).count(),
    };
    if report.delivered == 0 {
        return Err(DispatchError::AllDeliveriesFailed {
            attempted: report.attempted,
        });
    }
    Ok(report)
}
