use std::fmt;

use super::pushbullet::PushbulletError;

/// Outcome of one delivery attempt to one device.
#[derive(Debug)]
pub enum Status {
    Delivered,
    Failed(PushbulletError),
}

impl Status {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Status::Delivered)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Delivered => f.write_str("delivered"),
            Status::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

impl<T> From<Result<T, PushbulletError>> for Status {
    fn from(res: Result<T, PushbulletError>) -> Self {
        match res {
            Ok(_) => Self::Delivered,
            Err(err) => Self::Failed(err),
        }
    }
}
