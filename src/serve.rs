//! Local HTTP surface for the site store.
//!
//! Built on `tiny_http`, handling requests one at a time on the main thread:
//!
//! | Request                  | Effect                                        |
//! |--------------------------|-----------------------------------------------|
//! | `GET /api/state`         | Aggregate state as JSON                       |
//! | `POST /api/login`        | Open the admin session                        |
//! | `POST /api/logout`       | Close the admin session                       |
//! | `POST /api/settings`     | Merge a partial settings object (admin only)  |
//! | `PUT /api/destinations`  | Replace all destinations (admin only)         |
//! | `PUT /api/blog`          | Replace all blog posts (admin only)           |
//! | `GET <page path>`        | Route resolution, `302` for guarded pages     |
//!
//! Ctrl+C unblocks the request loop and the server returns.

use crate::{
    config::AppConfig,
    context::{Context, SiteHandle},
    debug, log,
    router::Resolution,
    store::{BlogPost, Destination, SettingsPatch, Storage, StoreError},
};
use anyhow::{Context as _, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    io::Read,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

const JSON: &str = "application/json; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the site in `cx` until Ctrl+C is received.
pub fn serve_site<S: Storage>(config: &AppConfig, cx: Context<'_, S>) -> Result<()> {
    let interface: IpAddr = config.serve.interface.parse()?;
    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, cx) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Transport-independent response.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
    location: Option<String>,
}

impl Reply {
    fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self {
                status,
                content_type: JSON,
                body,
                location: None,
            },
            Err(e) => Self::text(500, &format!("failed to encode response: {e}")),
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: TEXT,
            body: body.to_owned(),
            location: None,
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            status: 302,
            content_type: TEXT,
            body: String::new(),
            location: Some(location),
        }
    }

    fn into_response(self) -> Result<Response<std::io::Cursor<Vec<u8>>>> {
        let mut response = Response::from_string(self.body)
            .with_status_code(StatusCode(self.status))
            .with_header(header("Content-Type", self.content_type)?);
        if let Some(location) = self.location {
            response = response.with_header(header("Location", &location)?);
        }
        Ok(response)
    }
}

fn header(field: &str, value: &str) -> Result<Header> {
    Header::from_bytes(field.as_bytes(), value.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid header `{field}: {value}`"))
}

/// Page payload for a rendered route.
#[derive(Debug, Serialize)]
struct PageView {
    page: &'static str,
    path: String,
    title: String,
}

/// Percent-decoded path of a request URL, without the query string.
///
/// `None` when the decoded bytes are not UTF-8.
fn request_path(url: &str) -> Option<String> {
    let path = url.split('?').next().unwrap_or_default();
    urlencoding::decode(path).ok().map(std::borrow::Cow::into_owned)
}

/// Handle a single HTTP request.
fn handle_request<S: Storage>(mut request: Request, cx: Context<'_, S>) -> Result<()> {
    let method = request.method().clone();
    let Some(path) = request_path(request.url()) else {
        debug!("serve"; "{} {} -> 400", method, request.url());
        request.respond(Reply::text(400, "400 Bad Request: malformed URL").into_response()?)?;
        return Ok(());
    };

    let mut body = String::new();
    if matches!(method, Method::Post | Method::Put) {
        request
            .as_reader()
            .read_to_string(&mut body)
            .context("failed to read request body")?;
    }

    let reply = match cx.use_site() {
        Ok(site) => respond_to(&site, &method, &path, &body),
        Err(e) => Reply::text(500, &e.to_string()),
    };
    debug!("serve"; "{} {} -> {}", method, path, reply.status);

    request.respond(reply.into_response()?)?;
    Ok(())
}

fn respond_to<S: Storage>(site: &SiteHandle<'_, S>, method: &Method, path: &str, body: &str) -> Reply {
    match (method, path) {
        (Method::Get, "/api/state") => Reply::json(200, &site.state()),
        (Method::Post, "/api/login") => mutate(site, |site| site.login()),
        (Method::Post, "/api/logout") => mutate(site, |site| site.logout()),
        (Method::Post, "/api/settings") => admin_only(site, || {
            let patch: SettingsPatch = parse_body(body)?;
            Ok(mutate(site, |site| site.update_settings(patch)))
        }),
        (Method::Put, "/api/destinations") => admin_only(site, || {
            let next: Vec<Destination> = parse_body(body)?;
            Ok(mutate(site, |site| site.set_destinations(next)))
        }),
        (Method::Put, "/api/blog") => admin_only(site, || {
            let next: Vec<BlogPost> = parse_body(body)?;
            Ok(mutate(site, |site| site.set_blog_posts(next)))
        }),
        (_, p) if p.starts_with("/api/") => Reply::text(404, "404 Not Found"),
        (Method::Get, _) => page(site, path),
        _ => Reply::text(405, "405 Method Not Allowed"),
    }
}

/// Run a mutation and answer with the new state or a mapped error.
fn mutate<S, F>(site: &SiteHandle<'_, S>, f: F) -> Reply
where
    S: Storage,
    F: FnOnce(&SiteHandle<'_, S>) -> Result<(), StoreError>,
{
    match f(site) {
        Ok(()) => Reply::json(200, &site.state()),
        Err(e) => {
            let status = match e {
                StoreError::DuplicateId { .. } => 409,
                StoreError::UnknownId { .. } => 404,
                StoreError::Encode { .. } | StoreError::Persist { .. } => 500,
            };
            if status == 500 {
                log!("store"; "{e}");
            }
            Reply::text(status, &e.to_string())
        }
    }
}

fn admin_only<S, F>(site: &SiteHandle<'_, S>, f: F) -> Reply
where
    S: Storage,
    F: FnOnce() -> Result<Reply, Reply>,
{
    if !site.is_admin() {
        return Reply::text(403, "403 Forbidden: admin session required");
    }
    f().unwrap_or_else(|reply| reply)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Reply> {
    serde_json::from_str(body).map_err(|e| Reply::text(400, &format!("invalid JSON body: {e}")))
}

fn page<S: Storage>(site: &SiteHandle<'_, S>, path: &str) -> Reply {
    match site.resolve(path) {
        None => Reply::text(404, "404 Not Found"),
        Some(Resolution::Redirect(route)) => Reply::redirect(route.path()),
        Some(Resolution::Render(route)) => Reply::json(
            200,
            &PageView {
                page: route.name(),
                path: route.path(),
                title: site.state().settings.site_name,
            },
        ),
    }
}
