//! Per-call credentials and the credential resolver.

use std::fmt;
use std::time::{Duration, Instant};

use crate::TransportMode;

const REDACTED: &str = "<redacted>";

/// The identity a single call runs as.
///
/// Lives only as long as the call that resolved it. `Debug` never prints
/// passwords or tokens.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum Credential {
    /// No authentication.
    #[default]
    None,
    /// Username and password.
    Basic {
        /// Login name
        username: String,
        /// Secret
        password: String,
    },
    /// Opaque bearer token (e.g. an SSO access token).
    Bearer {
        /// Secret
        token: String,
    },
}

impl Credential {
    /// Username/password credential.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credential::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credential::Bearer {
            token: token.into(),
        }
    }

    /// `"none"`, `"basic"` or `"bearer"`. Safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::None => "none",
            Credential::Basic { .. } => "basic",
            Credential::Bearer { .. } => "bearer",
        }
    }

    /// The username of a basic credential.
    pub fn username(&self) -> Option<&str> {
        match self {
            Credential::Basic { username, .. } => Some(username),
            _ => None,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::None => f.write_str("None"),
            Credential::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &REDACTED)
                .finish(),
            Credential::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &REDACTED)
                .finish(),
        }
    }
}

/// Per-call context supplied by the transport layer.
///
/// Carries the caller's credential (bearer token and/or basic pair, as
/// extracted from the inbound request) and an optional deadline. Passed
/// explicitly to every gateway operation.
#[derive(Clone, Default)]
pub struct RequestContext {
    bearer_token: Option<String>,
    basic: Option<(String, String)>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// An empty context: no credential, no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a bearer token.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Attach a basic-auth pair.
    pub fn with_basic(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic = Some((username.into(), password.into()));
        self
    }

    /// Abandon the call at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abandon the call `timeout` from now.
    ///
    /// A timeout too large to represent as an `Instant` leaves the call
    /// without a deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// The attached bearer token, if non-empty.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|t| !t.is_empty())
    }

    /// The attached basic-auth pair, if the username is non-empty.
    pub fn basic(&self) -> Option<(&str, &str)> {
        self.basic
            .as_ref()
            .filter(|(user, _)| !user.is_empty())
            .map(|(user, pass)| (user.as_str(), pass.as_str()))
    }

    /// The call deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// True if a usable credential is attached.
    pub fn has_credential(&self) -> bool {
        self.bearer_token().is_some() || self.basic().is_some()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| REDACTED))
            .field("basic_user", &self.basic.as_ref().map(|(user, _)| user))
            .field("deadline", &self.deadline)
            .finish()
    }
}

/// Choose the credential a call runs with.
///
/// - Single-tenant: always `static_credential`; anything on the context is
///   ignored, because the shared connection already carries fixed credentials.
/// - Multi-tenant: the context's bearer token, else its basic pair, else
///   `None`. There is no fallback to `static_credential`.
///
/// `None` must be treated by the caller as an authentication failure.
pub fn resolve_credential(
    mode: TransportMode,
    ctx: &RequestContext,
    static_credential: &Credential,
) -> Option<Credential> {
    match mode {
        TransportMode::SingleTenant => Some(static_credential.clone()),
        TransportMode::MultiTenant => {
            if let Some(token) = ctx.bearer_token() {
                return Some(Credential::bearer(token));
            }
            ctx.basic()
                .map(|(user, pass)| Credential::basic(user, pass))
        }
    }
}
