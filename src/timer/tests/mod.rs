//! Timer solver unit tests

use super::*;

/// Build a request that is known to be valid
pub(crate) fn request(hz: f64, seconds: f64, width: CounterWidth) -> TimerRequest {
    TimerRequest::new(hz, seconds, width).expect("valid request")
}
