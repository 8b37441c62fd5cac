//! Per-connection handling.

use crate::auth::AuthGate;
use crate::dispatch::Dispatcher;
use picsync_protocol::{read_frame, write_frame, FrameResult, Request, Response, StatusCode};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

/// Handles one connection: exactly one request in, exactly one response
/// out, then the write side is shut down.
///
/// A frame that fails to decode is answered with a synthetic `BadRequest`
/// and never reaches the gate or a handler. The connection is never reused
/// for a second request.
///
/// # Errors
///
/// Returns the I/O error if the response cannot be written; the caller
/// logs it at the connection boundary.
pub async fn handle_connection<S>(
    mut stream: S,
    gate: &AuthGate,
    dispatcher: &Dispatcher,
) -> FrameResult<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let response = match read_request(&mut stream).await {
        Ok(request) => match gate.authenticate(request) {
            Ok(request) => dispatcher.dispatch(&request),
            Err(unauthorized) => unauthorized,
        },
        Err(err) => {
            debug!(%err, "request frame rejected");
            Response::from_status(StatusCode::BadRequest)
        }
    };

    let body = response.encode().unwrap_or_else(|err| {
        // A payload that fails to encode degrades to a bare error status;
        // the bare response cannot itself fail.
        error!(%err, "response payload failed to encode");
        encode_bare_internal_error()
    });
    write_frame(&mut stream, &body).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn read_request<S>(stream: &mut S) -> FrameResult<Request>
where
    S: AsyncRead + Unpin,
{
    let body = read_frame(stream).await?;
    Request::decode(&body)
}

fn encode_bare_internal_error() -> Vec<u8> {
    Response::from_status(StatusCode::InternalError)
        .encode()
        .unwrap_or_default()
}
