//! Correlation id for one API request.
//!
//! The [`Trace`](crate::Trace) middleware opens a scope per request. Inside
//! it, [`TraceId::current`] is what error payloads copy into `traceId` and
//! what the `trace-id` response header carries. Task-locals do not follow
//! `tokio::spawn`, so spawned work must re-enter [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// A request's correlation id, rendered as a hyphenated UUID.
///
/// # Examples
/// ```
/// use incident_tracker::domain::TraceId;
///
/// let id: TraceId = "6c0f4f2e-4f4b-4d43-9a52-1f1a0c3b7e10".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6c0f4f2e-4f4b-4d43-9a52-1f1a0c3b7e10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// A fresh random id for a new request.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id of the request being served on this task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
