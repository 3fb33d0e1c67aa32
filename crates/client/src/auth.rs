//! Login credentials.
//!
//! Never persisted: only the identity returned by a successful login is.

/// What the user hands over to log in. Exactly one login path is taken.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Cookie header copied from a browser session
    Cookies(String),
    /// Email/password pair
    Password { email: String, password: String },
}

impl Credentials {
    pub fn cookies(cookies: impl Into<String>) -> Self {
        Credentials::Cookies(cookies.into())
    }

    pub fn password(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Password { email: email.into(), password: password.into() }
    }

    /// Login identifier the user typed, if any (the email for password logins).
    pub fn login_id(&self) -> Option<&str> {
        match self {
            Credentials::Cookies(_) => None,
            Credentials::Password { email, .. } => Some(email),
        }
    }

    /// Short label for logs.
    pub fn method(&self) -> &'static str {
        match self {
            Credentials::Cookies(_) => "cookies",
            Credentials::Password { .. } => "password",
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Cookies(_) => f.write_str("Credentials::Cookies(<redacted>)"),
            Credentials::Password { email, .. } => f
                .debug_struct("Credentials::Password")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
