use std::cell::{Cell, RefCell};

use actix_web::http::StatusCode;
use futures::future::{self, FutureExt as _, LocalBoxFuture};

use super::{ApiKey, DeviceId, Note, NoteService, PushbulletError};

pub const KEY: &str = "o.AbCdEfGhIjKlMnOpQrStUvWxYz0123";

/// In-memory [`NoteService`] recording every call made to it.
#[derive(Debug, Default)]
pub struct FakeNotes {
    devices: Option<Vec<DeviceId>>,
    failing: Vec<DeviceId>,
    hanging: Vec<DeviceId>,
    device_calls: Cell<usize>,
    pushed: RefCell<Vec<DeviceId>>,
    bodies: RefCell<Vec<String>>,
}

fn ids(ids: &[i64]) -> Vec<DeviceId> {
    ids.iter().copied().map(DeviceId).collect()
}

impl FakeNotes {
    pub fn new(devices: &[i64]) -> Self {
        Self {
            devices: Some(ids(devices)),
            ..Self::default()
        }
    }

    /// Device listing fails.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn failing(mut self, devices: &[i64]) -> Self {
        self.failing = ids(devices);
        self
    }

    pub fn hanging(mut self, devices: &[i64]) -> Self {
        self.hanging = ids(devices);
        self
    }

    pub fn device_calls(&self) -> usize {
        self.device_calls.get()
    }

    pub fn pushed(&self) -> Vec<DeviceId> {
        self.pushed.borrow().clone()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.borrow().clone()
    }
}

impl NoteService for FakeNotes {
    fn devices<'a>(
        &'a self,
        _key: &'a ApiKey,
    ) -> LocalBoxFuture<'a, Result<Vec<DeviceId>, PushbulletError>> {
        self.device_calls.set(self.device_calls.get() + 1);
        let res = self
            .devices
            .clone()
            .ok_or(PushbulletError::Status(StatusCode::UNAUTHORIZED));
        future::ready(res).boxed_local()
    }

    fn push_note<'a>(
        &'a self,
        _key: &'a ApiKey,
        device: DeviceId,
        note: &'a Note,
    ) -> LocalBoxFuture<'a, Result<(), PushbulletError>> {
        self.pushed.borrow_mut().push(device);
        self.bodies.borrow_mut().push(note.body.clone());
        if self.hanging.contains(&device) {
            return future::pending().boxed_local();
        }
        let res = if self.failing.contains(&device) {
            Err(PushbulletError::Status(StatusCode::BAD_REQUEST))
        } else {
            Ok(())
        };
        future::ready(res).boxed_local()
    }
}
