//! Request correlation.
//!
//! Every request runs with a [`TraceId`] bound: the caller's own `trace-id`
//! header when it holds a UUID, otherwise a fresh one. The identifier is
//! echoed on the response and on the completion log line.

use std::time::Instant;

use actix_web::Error;
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use tracing::{info, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware body; mount with `actix_web::middleware::from_fn(trace)`.
///
/// # Examples
/// ```
/// use actix_web::{App, middleware::from_fn};
/// use workout_planner::trace;
///
/// let app = App::new().wrap(from_fn(trace));
/// ```
pub async fn trace(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let supplied = req
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok());
    let trace_id = TraceId::from_client(supplied);
    let method = req.method().clone();
    let path = req.path().to_owned();
    let started = Instant::now();

    let mut res = trace_id.in_scope(next.call(req)).await?;

    match HeaderValue::from_str(&trace_id.to_string()) {
        Ok(value) => {
            res.headers_mut()
                .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
        }
        Err(error) => warn!(%error, %trace_id, "trace id is not a valid header value"),
    }
    info!(
        %trace_id,
        %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "request completed"
    );
    Ok(res.map_into_boxed_body())
}
