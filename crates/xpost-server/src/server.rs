// ============================================================================
// server — tiny_http accept loop
// ============================================================================
// Requests are read and answered one at a time on the calling thread. The
// posting call is driven to completion on the tokio runtime before the next
// request is accepted.
// ============================================================================

use std::io::Read;

use anyhow::{anyhow, Result};
use tiny_http::{Header, Request, Response, Server};
use tokio::runtime::Handle;
use tracing::{error, info, warn};
use xpost_core::PostingClient;

use crate::app::{App, Incoming, Reply};

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Serve `app` on `bind` until the listener fails
pub fn serve<C: PostingClient>(mut app: App<C>, bind: &str, runtime: Handle) -> Result<()> {
    let server =
        Server::http(bind).map_err(|e| anyhow!("Failed to start server on {}: {}", bind, e))?;

    info!("Listening on http://{}", bind);

    for mut request in server.incoming_requests() {
        let reply = match read_incoming(&mut request) {
            Ok(incoming) => runtime.block_on(app.handle(incoming)),
            Err(reply) => reply,
        };

        if let Err(e) = respond(request, reply) {
            error!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

fn read_incoming(request: &mut Request) -> std::result::Result<Incoming, Reply> {
    let cookie = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Cookie"))
        .map(|h| h.value.as_str().to_string());

    let mut raw = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| {
            warn!("Failed to read request body: {}", e);
            Reply::bad_request()
        })?;

    if raw.len() as u64 > MAX_BODY_BYTES {
        warn!("Rejected oversized request body");
        return Err(Reply::payload_too_large());
    }

    let body = String::from_utf8(raw).map_err(|_| Reply::bad_request())?;

    // Drop any query string, routes are path-only
    let path = request
        .url()
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();

    Ok(Incoming {
        method: request.method().clone(),
        path,
        cookie,
        body,
    })
}

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes())
        .map_err(|_| anyhow!("invalid header {}: {}", name, value))
}

fn respond(request: Request, reply: Reply) -> Result<()> {
    let mut response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(header("Content-Type", reply.content_type)?);

    if let Some(location) = reply.location {
        response = response.with_header(header("Location", &location)?);
    }
    if let Some(cookie) = reply.set_cookie {
        response = response.with_header(header("Set-Cookie", &cookie)?);
    }

    request.respond(response)?;
    Ok(())
}
