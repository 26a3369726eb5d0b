//! Identity provider.
//!
//! Accounts are email and password pairs. The provider reports failures
//! with a string code, which [`IdentityError::user_message`] turns into
//! text for the user.

use crate::id::UserId;
use crate::persist::{read_document, write_document};
use crate::store::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

/// Shortest password the provider accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Provider failure codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityCode {
    EmailAlreadyInUse,
    InvalidEmail,
    WeakPassword,
    InvalidCredential,
    UserNotFound,
    WrongPassword,
    /// The account book couldn't be saved.
    StorageFailure,
    Other(String),
}

impl IdentityCode {
    pub fn as_str(&self) -> &str {
        match self {
            IdentityCode::EmailAlreadyInUse => "email-already-in-use",
            IdentityCode::InvalidEmail => "invalid-email",
            IdentityCode::WeakPassword => "weak-password",
            IdentityCode::InvalidCredential => "invalid-credential",
            IdentityCode::UserNotFound => "user-not-found",
            IdentityCode::WrongPassword => "wrong-password",
            IdentityCode::StorageFailure => "storage-failure",
            IdentityCode::Other(code) => code.as_str(),
        }
    }

    /// Parse a provider code. Unrecognized codes are kept as [`IdentityCode::Other`].
    pub fn parse(code: &str) -> Self {
        match code {
            "email-already-in-use" => IdentityCode::EmailAlreadyInUse,
            "invalid-email" => IdentityCode::InvalidEmail,
            "weak-password" => IdentityCode::WeakPassword,
            "invalid-credential" => IdentityCode::InvalidCredential,
            "user-not-found" => IdentityCode::UserNotFound,
            "wrong-password" => IdentityCode::WrongPassword,
            "storage-failure" => IdentityCode::StorageFailure,
            other => IdentityCode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for IdentityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct IdentityError {
    pub code: IdentityCode,
    /// The provider's own message.
    pub message: String,
}

impl IdentityError {
    pub fn new(code: IdentityCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Text to show the user. Codes without a mapping fall back to the
    /// provider's message.
    pub fn user_message(&self) -> String {
        match self.code {
            IdentityCode::EmailAlreadyInUse => "That email is already registered.".to_string(),
            IdentityCode::InvalidEmail => "That email address isn't valid.".to_string(),
            IdentityCode::WeakPassword => {
                format!("Password must be at least {MIN_PASSWORD_LEN} characters.")
            }
            IdentityCode::InvalidCredential => "Email or password is incorrect.".to_string(),
            IdentityCode::UserNotFound => "No account exists for that email.".to_string(),
            IdentityCode::WrongPassword => "Incorrect password.".to_string(),
            IdentityCode::StorageFailure => {
                "Your account couldn't be saved. Please try again.".to_string()
            }
            IdentityCode::Other(_) => self.message.clone(),
        }
    }
}

/// Input problems caught before the provider is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your email.")]
    MissingEmail,

    #[error("Please enter your password.")]
    MissingPassword,

    #[error("Please enter a display name.")]
    MissingDisplayName,
}

/// Which form the credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    Register,
}

/// What the user typed into the sign-in or registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            display_name: String::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Check for empty required fields. The display name only matters when registering.
    pub fn validate(&self, mode: AuthMode) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if mode == AuthMode::Register && self.display_name.trim().is_empty() {
            return Err(ValidationError::MissingDisplayName);
        }
        Ok(())
    }
}

/// Issues and tracks identities.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    async fn register(&self, email: &str, password: &str) -> Result<UserId, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// The signed-in identity, if any.
    fn current(&self) -> Option<UserId>;

    /// Notified whenever the signed-in identity changes.
    fn subscribe(&self) -> watch::Receiver<Option<UserId>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    id: UserId,
    salt: String,
    password_hash: String,
}

impl Account {
    fn new(id: UserId, password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let password_hash = hash_password(&salt, password);
        Self {
            id,
            salt,
            password_hash,
        }
    }

    fn matches(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Every account by normalized email, plus who is signed in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AccountBook {
    accounts: BTreeMap<String, Account>,
    current: Option<UserId>,
}

/// Identity provider kept in process, optionally backed by a file.
///
/// Passwords are stored only as salted SHA-256 hashes. A provider from
/// [`LocalIdentityProvider::open`] saves its accounts and the signed-in
/// identity after every change, so a restarted process can sign the same
/// users in again or resume the remembered one.
#[derive(Debug)]
pub struct LocalIdentityProvider {
    book: Mutex<AccountBook>,
    current: watch::Sender<Option<UserId>>,
    path: Option<PathBuf>,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalIdentityProvider {
    /// A provider whose accounts live only as long as it does.
    pub fn new() -> Self {
        Self::with_book(AccountBook::default(), None)
    }

    /// Load the account book at `path`, or start an empty one there.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let book: AccountBook = read_document(&path).await?.unwrap_or_default();
        info!(
            path = %path.display(),
            accounts = book.accounts.len(),
            "Opened account book"
        );
        Ok(Self::with_book(book, Some(path)))
    }

    fn with_book(book: AccountBook, path: Option<PathBuf>) -> Self {
        let (current, _) = watch::channel(book.current);
        Self {
            book: Mutex::new(book),
            current,
            path,
        }
    }

    /// Save `next` and make it the live book. Nothing changes if saving fails.
    async fn commit(
        &self,
        book: &mut AccountBook,
        next: AccountBook,
    ) -> Result<(), IdentityError> {
        if let Some(path) = &self.path {
            write_document(path, &next)
                .await
                .map_err(|e| IdentityError::new(IdentityCode::StorageFailure, e.to_string()))?;
            debug!(path = %path.display(), "Saved account book");
        }
        let current = next.current;
        *book = next;
        self.current.send_replace(current);
        Ok(())
    }

    fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }

    fn check_email(email: &str) -> Result<(), IdentityError> {
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
        if valid {
            Ok(())
        } else {
            Err(IdentityError::new(
                IdentityCode::InvalidEmail,
                "The email address is badly formatted.",
            ))
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn register(&self, email: &str, password: &str) -> Result<UserId, IdentityError> {
        let email = Self::normalize(email);
        Self::check_email(&email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::new(
                IdentityCode::WeakPassword,
                format!("Password should be at least {MIN_PASSWORD_LEN} characters."),
            ));
        }

        let mut book = self.book.lock().await;
        if book.accounts.contains_key(&email) {
            return Err(IdentityError::new(
                IdentityCode::EmailAlreadyInUse,
                "The email address is already in use by another account.",
            ));
        }

        let id = UserId::new();
        let mut next = book.clone();
        next.accounts.insert(email, Account::new(id, password));
        next.current = Some(id);
        self.commit(&mut book, next).await?;
        Ok(id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, IdentityError> {
        let email = Self::normalize(email);
        Self::check_email(&email)?;

        let mut book = self.book.lock().await;
        let account = book.accounts.get(&email).ok_or_else(|| {
            IdentityError::new(
                IdentityCode::UserNotFound,
                "There is no user record corresponding to this identifier.",
            )
        })?;
        if !account.matches(password) {
            return Err(IdentityError::new(
                IdentityCode::WrongPassword,
                "The password is invalid.",
            ));
        }
        let id = account.id;

        let mut next = book.clone();
        next.current = Some(id);
        self.commit(&mut book, next).await?;
        Ok(id)
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        let mut book = self.book.lock().await;
        let mut next = book.clone();
        next.current = None;
        self.commit(&mut book, next).await
    }

    fn current(&self) -> Option<UserId> {
        *self.current.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<UserId>> {
        self.current.subscribe()
    }
}
