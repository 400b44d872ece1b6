/**
 * Credential Verifier
 *
 * The only component that produces or checks a password hash.
 *
 * # Hashing
 *
 * Passwords are hashed with bcrypt. Every hash embeds its own random salt
 * and cost factor, so hashing the same password twice gives two different
 * strings, and verification needs nothing but the stored hash. The byte
 * comparison inside `bcrypt::verify` is constant-time.
 *
 * bcrypt only reads the first 72 bytes of its input. Longer passwords are
 * refused at registration and never match at login, so two passwords
 * sharing a 72-byte prefix cannot stand in for each other.
 *
 * # Login State Machine
 *
 * ```text
 * Start -> LookupUser -> Found    -> CheckPassword -> Match    -> Accepted
 *                                                  -> Mismatch -> Rejected
 *                     -> NotFound -> Rejected
 * ```
 *
 * There are no retries. A store failure during lookup is an error, never a
 * rejection. An unknown username still pays for one bcrypt verification, so
 * both rejections take about as long.
 */

use std::fmt;

use crate::backend::auth::error::AuthError;
use crate::backend::auth::users::UserLookup;
use crate::shared::identity::{IdentityRecord, StoredRecord};

/// Message shown for every rejected login
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Longest password bcrypt hashes without truncation
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Salt and digest of a well-formed bcrypt hash, checked against when the
/// username is unknown
const DECOY_SALT_AND_DIGEST: &str = "CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";

/// A valid bcrypt hash at `cost` that no password of interest matches
fn decoy_hash(cost: u32) -> String {
    format!("$2a${:02}${}", cost, DECOY_SALT_AND_DIGEST)
}

/// Why a login was rejected. Visible only inside the crate, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RejectReason {
    NoSuchUser,
    BadPassword,
}

/// A rejected login
///
/// Every `Rejection` compares equal to every other and formats the same
/// way, so callers cannot tell an unknown username from a wrong password.
#[derive(Clone, Copy)]
pub struct Rejection {
    reason: RejectReason,
}

impl Rejection {
    pub(crate) fn new(reason: RejectReason) -> Self {
        Self { reason }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn reason(&self) -> RejectReason {
        self.reason
    }
}

impl PartialEq for Rejection {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Rejection {}

impl fmt::Debug for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Rejection")
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVALID_CREDENTIALS)
    }
}

/// Terminal state of a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Password matched; the principal is the username
    Accepted { principal: String },
    /// Unknown user or wrong password
    Rejected(Rejection),
}

impl AuthOutcome {
    pub(crate) fn rejected(reason: RejectReason) -> Self {
        Self::Rejected(Rejection::new(reason))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The authenticated principal, if accepted
    pub fn principal(&self) -> Option<&str> {
        match self {
            Self::Accepted { principal } => Some(principal),
            Self::Rejected(_) => None,
        }
    }
}

/// bcrypt-backed password hashing and checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialVerifier {
    cost: u32,
}

impl Default for CredentialVerifier {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl CredentialVerifier {
    /// Create a verifier hashing at the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - If the password is empty or longer than 72 bytes
    /// * `Hashing` - If bcrypt rejects the cost
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        check_password(plaintext)?;
        Ok(bcrypt::non_truncating_hash(plaintext, self.cost)?)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed stored hash never matches, and neither does a password
    /// longer than 72 bytes.
    pub fn verify(&self, hash: &str, plaintext: &str) -> bool {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match bcrypt::non_truncating_verify(plaintext, hash) {
            Ok(matched) => matched,
            Err(_) => {
                // The error text can echo the stored hash, so it is not logged.
                tracing::error!("Stored password hash is malformed");
                false
            }
        }
    }

    /// Hash the password and attach it to the record
    ///
    /// Returns the storage-shaped record ready for insertion.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - If the username or password is empty
    /// * `Hashing` - If hashing fails
    pub fn register(
        &self,
        mut record: IdentityRecord,
        plaintext: &str,
    ) -> Result<StoredRecord, AuthError> {
        check_registration_input(record.username(), plaintext)?;

        let hash = self.hash(plaintext)?;
        record.set_password_hash(hash);
        record.into_stored().map_err(AuthError::InvalidInput)
    }

    /// Run a login attempt against a user lookup
    ///
    /// # Arguments
    ///
    /// * `lookup` - Source of stored user records
    /// * `username` - Claimed identity
    /// * `plaintext` - Supplied password
    ///
    /// # Errors
    ///
    /// * `StoreUnavailable` - If the lookup fails
    /// * `CorruptRecord` - If the stored record cannot be decoded
    /// * `Hashing` - If the verification task fails
    pub async fn authenticate<L>(
        &self,
        lookup: &L,
        username: &str,
        plaintext: &str,
    ) -> Result<AuthOutcome, AuthError>
    where
        L: UserLookup + ?Sized,
    {
        let record = lookup.find_by_username(username).await?;

        let verifier = *self;
        let hash = match &record {
            Some(record) => record.password_hash().to_string(),
            None => decoy_hash(self.cost),
        };
        let plaintext = plaintext.to_string();
        let matched =
            tokio::task::spawn_blocking(move || verifier.verify(&hash, &plaintext)).await?;

        let Some(record) = record else {
            tracing::warn!("Login rejected: no such user: {}", username);
            return Ok(AuthOutcome::rejected(RejectReason::NoSuchUser));
        };

        if matched {
            tracing::info!("Login accepted for user: {}", record.username());
            Ok(AuthOutcome::Accepted {
                principal: record.username().to_string(),
            })
        } else {
            tracing::warn!("Login rejected: bad password for user: {}", record.username());
            Ok(AuthOutcome::rejected(RejectReason::BadPassword))
        }
    }
}

/// Reject empty usernames and unhashable passwords
pub(crate) fn check_registration_input(username: &str, plaintext: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::invalid_input("username", "must not be empty"));
    }
    check_password(plaintext)
}

fn check_password(plaintext: &str) -> Result<(), AuthError> {
    if plaintext.is_empty() {
        return Err(AuthError::invalid_input("password", "must not be empty"));
    }
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::invalid_input(
            "password",
            format!("must be at most {} bytes", MAX_PASSWORD_BYTES),
        ));
    }
    Ok(())
}
