//! Credentials types for API authentication.

use std::fmt;

use zeroize::Zeroizing;

use crate::Error;

/// Login path for user credentials.
pub const SESSION_PATH: &str = "/api/session";

/// Login path for instance tokens.
pub const INSTANCE_SESSION_PATH: &str = "/api/session/instance";

/// User login: email, password and the account to act in.
///
/// The password is zeroized on drop.
///
/// ```rust
/// use right_api::PasswordCredentials;
///
/// let creds = PasswordCredentials::new("ops@example.com", "s3cret", "1234");
/// assert_eq!(creds.account_href(), "/api/accounts/1234");
/// assert!(!format!("{:?}", creds).contains("s3cret"));
/// ```
#[derive(Clone)]
pub struct PasswordCredentials {
    email: String,
    password: Zeroizing<String>,
    account_id: String,
}

impl PasswordCredentials {
    /// Creates user credentials.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
            account_id: account_id.into(),
        }
    }

    /// Returns the login email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the account id.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Returns the account href sent with the login.
    pub fn account_href(&self) -> String {
        format!("/api/accounts/{}", self.account_id)
    }
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Instance token login, as used from inside a managed instance.
///
/// The token is zeroized on drop.
#[derive(Clone)]
pub struct InstanceTokenCredentials {
    token: Zeroizing<String>,
    account_id: Option<String>,
}

impl InstanceTokenCredentials {
    /// Creates instance token credentials.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            account_id: None,
        }
    }

    /// Sets the account id sent with the login.
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Returns the account id, if set.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }
}

impl fmt::Debug for InstanceTokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceTokenCredentials")
            .field("token", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Authentication credentials.
///
/// Exactly one mode is used to build the login payload and pick the login
/// path. Instance token mode also restricts which root collections the client
/// exposes.
///
/// ```rust
/// use right_api::Credentials;
///
/// let user = Credentials::password("ops@example.com", "s3cret", "1234");
/// assert!(!user.is_instance_token());
/// assert_eq!(user.login_path(), "/api/session");
///
/// let instance = Credentials::instance_token("abcdef");
/// assert_eq!(instance.login_path(), "/api/session/instance");
/// ```
#[derive(Clone)]
pub enum Credentials {
    /// Email, password and account.
    Password(PasswordCredentials),

    /// Instance API token.
    InstanceToken(InstanceTokenCredentials),
}

impl Credentials {
    /// Creates user credentials.
    pub fn password(
        email: impl Into<String>,
        password: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Credentials::Password(PasswordCredentials::new(email, password, account_id))
    }

    /// Creates instance token credentials.
    pub fn instance_token(token: impl Into<String>) -> Self {
        Credentials::InstanceToken(InstanceTokenCredentials::new(token))
    }

    /// Returns `true` for instance token authentication.
    pub fn is_instance_token(&self) -> bool {
        matches!(self, Credentials::InstanceToken(_))
    }

    /// Returns the login path for this mode.
    pub fn login_path(&self) -> &'static str {
        match self {
            Credentials::Password(_) => SESSION_PATH,
            Credentials::InstanceToken(_) => INSTANCE_SESSION_PATH,
        }
    }

    /// Checks that every required field is present.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Credentials::Password(creds) => {
                if creds.email.is_empty() {
                    return Err(Error::configuration("email is required"));
                }
                if creds.password.is_empty() {
                    return Err(Error::configuration("password is required"));
                }
                if creds.account_id.is_empty() {
                    return Err(Error::configuration("account_id is required"));
                }
            }
            Credentials::InstanceToken(creds) => {
                if creds.token.is_empty() {
                    return Err(Error::configuration("instance_token is required"));
                }
            }
        }
        Ok(())
    }

    /// Renders the form-encoded login payload.
    pub(crate) fn login_form(&self) -> Zeroizing<String> {
        let encode = |s: &str| urlencoding::encode(s).into_owned();
        let form = match self {
            Credentials::Password(creds) => format!(
                "email={}&password={}&account_href={}",
                encode(&creds.email),
                encode(&creds.password),
                encode(&creds.account_href()),
            ),
            Credentials::InstanceToken(creds) => {
                let mut form = format!("instance_token={}", encode(&creds.token));
                if let Some(ref account_id) = creds.account_id {
                    form.push_str("&account_href=");
                    form.push_str(&encode(&format!("/api/accounts/{}", account_id)));
                }
                form
            }
        };
        Zeroizing::new(form)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password(creds) => f.debug_tuple("Password").field(creds).finish(),
            Credentials::InstanceToken(creds) => {
                f.debug_tuple("InstanceToken").field(creds).finish()
            }
        }
    }
}

impl From<PasswordCredentials> for Credentials {
    fn from(creds: PasswordCredentials) -> Self {
        Credentials::Password(creds)
    }
}

impl From<InstanceTokenCredentials> for Credentials {
    fn from(creds: InstanceTokenCredentials) -> Self {
        Credentials::InstanceToken(creds)
    }
}
