// ============================================================================
// app — request routing and session handling
// ============================================================================
// One App per process, driven by a single thread: the session map needs no
// locking. Only unlocked sessions are stored; an unknown or missing cookie
// is a locked session.
// ============================================================================

use std::collections::HashMap;
use std::time::Instant;

use tiny_http::Method;
use tracing::{debug, info, warn};
use xpost_core::{AccessGate, AppConfig, Composer, PostDraft, PostingClient, Session, XpostError};

use crate::form::{expired_session_cookie, parse_form, session_cookie, session_id};
use crate::page::{compose_page, login_page, ComposeForm, Notice};

/// Maximum number of unlocked sessions kept in memory
const MAX_SESSIONS: usize = 1000;

/// A request, reduced to what the routes need
#[derive(Debug, Clone)]
pub struct Incoming {
    pub method: Method,
    pub path: String,
    pub cookie: Option<String>,
    pub body: String,
}

/// A response, before it is turned into a tiny_http::Response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
}

impl Reply {
    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
            set_cookie: None,
        }
    }

    fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.to_string(),
            location: None,
            set_cookie: None,
        }
    }

    fn redirect(to: &str) -> Self {
        Self {
            status: 303,
            content_type: "text/plain; charset=utf-8",
            body: String::new(),
            location: Some(to.to_string()),
            set_cookie: None,
        }
    }

    fn with_cookie(mut self, cookie: String) -> Self {
        self.set_cookie = Some(cookie);
        self
    }

    pub fn not_found() -> Self {
        Self::text(404, "not found")
    }

    pub fn payload_too_large() -> Self {
        Self::text(413, "request body too large")
    }

    pub fn bad_request() -> Self {
        Self::text(400, "bad request")
    }
}

struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

pub struct App<C> {
    config: AppConfig,
    gate: AccessGate,
    composer: Composer<C>,
    sessions: HashMap<String, SessionEntry>,
}

impl<C: PostingClient> App<C> {
    pub fn new(config: AppConfig, gate: AccessGate, composer: Composer<C>) -> Self {
        Self {
            config,
            gate,
            composer,
            sessions: HashMap::new(),
        }
    }

    /// Session for a cookie; unknown ids get a fresh locked session
    fn session(&mut self, id: Option<&str>) -> Session {
        match id.and_then(|id| self.sessions.get_mut(id)) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                entry.session.clone()
            }
            None => Session::new(),
        }
    }

    fn store(&mut self, id: String, session: Session) {
        if self.sessions.len() >= MAX_SESSIONS && !self.sessions.contains_key(&id) {
            if let Some(oldest) = self
                .sessions
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone())
            {
                debug!("Evicting oldest session");
                self.sessions.remove(&oldest);
            }
        }
        self.sessions.insert(
            id,
            SessionEntry {
                session,
                last_seen: Instant::now(),
            },
        );
    }

    pub async fn handle(&mut self, req: Incoming) -> Reply {
        debug!("{} {}", req.method, req.path);
        let sid = session_id(req.cookie.as_deref());

        match (&req.method, req.path.as_str()) {
            (Method::Get, "/health") => Reply::text(200, "ok"),
            (Method::Get, "/") => self.index(sid.as_deref()),
            (Method::Post, "/login") => self.login(sid, &req.body),
            (Method::Post, "/post") => self.post(sid.as_deref(), &req.body).await,
            (Method::Post, "/logout") => self.logout(sid.as_deref()),
            _ => Reply::not_found(),
        }
    }

    fn index(&mut self, sid: Option<&str>) -> Reply {
        let session = self.session(sid);
        if session.is_authenticated() {
            Reply::html(compose_page(&self.config, &ComposeForm::default(), None))
        } else {
            Reply::html(login_page(&self.config, None))
        }
    }

    fn login(&mut self, sid: Option<String>, body: &str) -> Reply {
        let form = parse_form(body);
        let candidate = form.get("password").map(String::as_str).unwrap_or_default();

        let mut session = self.session(sid.as_deref());
        match self.gate.unlock(&mut session, candidate) {
            Ok(()) => {
                // Never reuse a client-supplied id for an unlocked session
                if let Some(old) = sid {
                    self.sessions.remove(&old);
                }
                let id = uuid::Uuid::new_v4().simple().to_string();
                self.store(id.clone(), session);
                Reply::redirect("/").with_cookie(session_cookie(&id))
            }
            Err(e) => {
                if let Some(id) = sid {
                    self.sessions.remove(&id);
                }
                Reply::html(login_page(&self.config, Some(&e.to_string())))
            }
        }
    }

    async fn post(&mut self, sid: Option<&str>, body: &str) -> Reply {
        let session = self.session(sid);
        let mut form = parse_form(body);
        let echo = ComposeForm {
            // Browsers send textarea line breaks as CRLF; maxlength counts them as one
            text: form
                .remove("text")
                .map(|t| t.replace("\r\n", "\n"))
                .unwrap_or_default(),
            quote_url: form.remove("quote_url").unwrap_or_default(),
        };
        let draft = PostDraft::new(echo.text.clone()).with_quote(echo.quote_url.clone());

        match self.composer.submit(&session, &draft).await {
            Ok(result) => {
                info!("Posted {}", result.post_id);
                let notice = Notice::Success(format!("Posted successfully! ID: {}", result.post_id));
                Reply::html(compose_page(&self.config, &ComposeForm::default(), Some(&notice)))
            }
            Err(XpostError::AccessDenied) => {
                warn!("Post attempted without an unlocked session");
                Reply::html(login_page(
                    &self.config,
                    Some(&XpostError::AccessDenied.to_string()),
                ))
            }
            Err(e) => {
                let notice = if e.is_validation() {
                    Notice::Error(format!("Validation error: {}", e))
                } else {
                    Notice::Error(format!("Error during posting: {}", e))
                };
                Reply::html(compose_page(&self.config, &echo, Some(&notice)))
            }
        }
    }

    fn logout(&mut self, sid: Option<&str>) -> Reply {
        if let Some(id) = sid {
            if let Some(mut entry) = self.sessions.remove(id) {
                self.gate.lock(&mut entry.session);
            }
        }
        Reply::redirect("/").with_cookie(expired_session_cookie())
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
