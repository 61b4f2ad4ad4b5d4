//! Local accounts, sessions and password-reset requests.
//!
//! Passwords are stored as Argon2id PHC strings, which embed the algorithm
//! parameters and a random salt. User ids and session tokens are random v4
//! UUIDs.
//!
//! Databases created before schema v3 hold `sha256$<salt>$<digest>` hashes.
//! Those still verify, and are rehashed with Argon2id on the next successful
//! sign-in.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{DateTime, Utc};
use gameshelf_catalog::{AuthError, Session, UserIdentity};
use rusqlite::{Connection, params};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::operations::OperationError;

/// Shortest password accepted on sign-up or change.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Prefix of password hashes written before the Argon2id switch.
pub const LEGACY_HASH_PREFIX: &str = "sha256$";

/// Failure of an account operation: either the request was rejected or the
/// database failed.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    Rejected(#[from] AuthError),
    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl From<rusqlite::Error> for AccountError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Operation(e.into())
    }
}

// ── Users ───────────────────────────────────────────────────────────────────

/// Register a new account. The email is stored trimmed and matched
/// case-insensitively afterwards.
pub fn create_user(
    conn: &Connection,
    email: &str,
    password: &str,
) -> Result<UserIdentity, AccountError> {
    let email = normalize_email(email)?;
    check_password(password)?;

    if find_user(conn, &email)?.is_some() {
        return Err(AuthError::AlreadyRegistered(email).into());
    }

    let id = random_token();
    conn.execute(
        "INSERT INTO users (id, email, password_hash) VALUES (?1, ?2, ?3)",
        params![id, email, hash_password(password)?],
    )?;
    log::info!("Registered account {}", email);
    Ok(UserIdentity { id, email })
}

/// Check a password. Returns `None` when the email is unknown or the password
/// does not match.
pub fn authenticate(
    conn: &Connection,
    email: &str,
    password: &str,
) -> Result<Option<UserIdentity>, OperationError> {
    let result = conn.query_row(
        "SELECT id, email, password_hash FROM users WHERE email = ?1",
        params![email.trim()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    );
    match result {
        Ok((id, email, hash)) => {
            if let Some(legacy) = hash.strip_prefix(LEGACY_HASH_PREFIX) {
                if !verify_legacy(legacy, password) {
                    return Ok(None);
                }
                conn.execute(
                    "UPDATE users SET password_hash = ?1 WHERE id = ?2",
                    params![hash_password(password)?, id],
                )?;
                log::info!("Upgraded password hash for {}", email);
            } else if !verify_password(&hash, password)? {
                return Ok(None);
            }
            Ok(Some(UserIdentity { id, email }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Look up an account by email (case-insensitive).
pub fn find_user(conn: &Connection, email: &str) -> Result<Option<UserIdentity>, OperationError> {
    let result = conn.query_row(
        "SELECT id, email FROM users WHERE email = ?1",
        params![email.trim()],
        |row| {
            Ok(UserIdentity {
                id: row.get(0)?,
                email: row.get(1)?,
            })
        },
    );
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Replace the password of an existing account. Existing sessions stay valid.
pub fn set_password(conn: &Connection, user_id: &str, password: &str) -> Result<(), AccountError> {
    check_password(password)?;
    let changed = conn.execute(
        "UPDATE users SET password_hash = ?1 WHERE id = ?2",
        params![hash_password(password)?, user_id],
    )?;
    if changed == 0 {
        return Err(OperationError::UserNotFound(user_id.to_string()).into());
    }
    Ok(())
}

// ── Sessions ────────────────────────────────────────────────────────────────

pub fn create_session(conn: &Connection, user: &UserIdentity) -> Result<Session, OperationError> {
    let token = random_token();
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
        params![token, user.id, created_at],
    )?;
    Ok(Session {
        token,
        user: user.clone(),
        created_at,
    })
}

pub fn find_session(conn: &Connection, token: &str) -> Result<Option<Session>, OperationError> {
    let result = conn.query_row(
        "SELECT s.token, s.created_at, u.id, u.email
         FROM sessions s JOIN users u ON u.id = s.user_id
         WHERE s.token = ?1",
        params![token],
        |row| {
            Ok(Session {
                token: row.get(0)?,
                created_at: row.get::<_, DateTime<Utc>>(1)?,
                user: UserIdentity {
                    id: row.get(2)?,
                    email: row.get(3)?,
                },
            })
        },
    );
    match result {
        Ok(session) => Ok(Some(session)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn delete_session(conn: &Connection, token: &str) -> Result<(), OperationError> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}

// ── Password Resets ─────────────────────────────────────────────────────────

/// Record a reset request. Unknown addresses are accepted and recorded too.
pub fn record_password_reset(
    conn: &Connection,
    email: &str,
    redirect_url: &str,
) -> Result<(), AccountError> {
    let email = normalize_email(email)?;
    conn.execute(
        "INSERT INTO password_resets (email, redirect_url) VALUES (?1, ?2)",
        params![email, redirect_url],
    )?;
    log::info!("Password reset requested for {} (redirect {})", email, redirect_url);
    Ok(())
}

pub fn count_password_resets(conn: &Connection, email: &str) -> Result<i64, OperationError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM password_resets WHERE email = ?1 COLLATE NOCASE",
        params![email.trim()],
        |row| row.get(0),
    )?;
    Ok(count)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AuthError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_string())
}

fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

fn hash_password(password: &str) -> Result<String, OperationError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| OperationError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(stored: &str, password: &str) -> Result<bool, OperationError> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| OperationError::PasswordHash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(OperationError::PasswordHash(e.to_string())),
    }
}

/// Check a pre-v3 `<salt>$<hex digest>` hash.
fn verify_legacy(stored: &str, password: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize()) == digest
}

fn random_token() -> String {
    Uuid::new_v4().simple().to_string()
}
