use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::{AuthError, SecretString};

/// Algorithm tag written into every credential this crate produces.
pub const ALGORITHM: &str = "pbkdf2_sha256";

/// Default PBKDF2 work factor for new credentials.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// Default number of random bytes in a session id (256 bits).
pub const DEFAULT_SESSION_ID_BYTES: usize = 32;

/// A parsed `pbkdf2_sha256$<iterations>$<salt>$<key>` credential.
///
/// Only the supported algorithm can be represented; anything else is
/// rejected with [`AuthError::UnsupportedAlgorithm`] while parsing.
///
/// ```rust
/// use authcore::Credential;
///
/// let encoded = "pbkdf2_sha256$1$c2FsdA==$VawEblbjCJ/sFpHCJUS2BflBhSFt3gRl5oudV8INrLw=";
/// let credential: Credential = encoded.parse().unwrap();
/// assert_eq!(credential.iterations(), 1);
/// assert_eq!(credential.to_string(), encoded);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    iterations: u32,
    salt: Vec<u8>,
    derived_key: Vec<u8>,
}

impl Credential {
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }

    /// Re-derives the key for `password` and compares it in constant time.
    pub fn matches(&self, password: &str) -> bool {
        let candidate = derive_key(password, &self.salt, self.iterations);
        constant_time_eq(&candidate, &self.derived_key)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ALGORITHM}${}${}${}",
            self.iterations,
            STANDARD.encode(&self.salt),
            STANDARD.encode(&self.derived_key)
        )
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("algorithm", &ALGORITHM)
            .field("iterations", &self.iterations)
            .finish_non_exhaustive()
    }
}

impl FromStr for Credential {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.splitn(4, '$');
        let (Some(algorithm), Some(iterations), Some(salt), Some(key)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(AuthError::MalformedCredential(
                "expected four '$'-separated fields".to_owned(),
            ));
        };

        // the tag decides how the rest is read, so it is checked first
        if algorithm != ALGORITHM {
            return Err(AuthError::UnsupportedAlgorithm(algorithm.to_owned()));
        }

        let iterations = iterations
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                AuthError::MalformedCredential("iterations must be a positive integer".to_owned())
            })?;

        let salt = STANDARD
            .decode(salt)
            .map_err(|e| AuthError::MalformedCredential(format!("salt: {e}")))?;
        if salt.is_empty() {
            return Err(AuthError::MalformedCredential("salt is empty".to_owned()));
        }

        let derived_key = STANDARD
            .decode(key)
            .map_err(|e| AuthError::MalformedCredential(format!("derived key: {e}")))?;
        if derived_key.len() != KEY_LEN {
            return Err(AuthError::MalformedCredential(format!(
                "derived key must be {KEY_LEN} bytes, got {}",
                derived_key.len()
            )));
        }

        Ok(Self {
            iterations,
            salt,
            derived_key,
        })
    }
}

/// Trait for password hashing and verification.
///
/// Implementations must be stateless apart from their parameters so a single
/// instance can be shared across threads.
///
/// # Example
///
/// ```rust
/// use authcore::crypto::{PasswordHasher, Pbkdf2Hasher};
///
/// let hasher = Pbkdf2Hasher::new(1_000);
/// let hash = hasher.hash("mypassword").unwrap();
/// assert!(hasher.verify("mypassword", &hash).unwrap());
/// assert!(!hasher.verify("wrongpassword", &hash).unwrap());
/// ```
pub trait PasswordHasher: Send + Sync {
    /// Hash a password into an encoded credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against an encoded credential.
    ///
    /// A wrong password is `Ok(false)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnsupportedAlgorithm` or
    /// `AuthError::MalformedCredential` if the stored credential is unusable.
    fn verify(&self, password: &str, credential: &str) -> Result<bool, AuthError>;
}

/// PBKDF2-HMAC-SHA256 hasher.
///
/// The iteration count only applies to new credentials; verification always
/// uses the count embedded in the stored credential, so raising it does not
/// invalidate anything already persisted.
#[derive(Debug, Clone)]
pub struct Pbkdf2Hasher {
    iterations: u32,
}

impl Default for Pbkdf2Hasher {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl Pbkdf2Hasher {
    #[must_use]
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        if self.iterations == 0 {
            return Err(AuthError::PasswordHashError);
        }

        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let derived_key = derive_key(password, &salt, self.iterations);

        Ok(Credential {
            iterations: self.iterations,
            salt,
            derived_key,
        }
        .to_string())
    }

    fn verify(&self, password: &str, credential: &str) -> Result<bool, AuthError> {
        let parsed: Credential = credential.parse()?;
        Ok(parsed.matches(password))
    }
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut key = vec![0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

/// Constant-time comparison to prevent timing attacks.
///
/// Lengths are not secret; equal-length inputs are always scanned in full.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    std::hint::black_box(result) == 0
}

/// Generates a URL-safe session id from `bytes` bytes of OS randomness.
///
/// ```rust
/// use authcore::crypto::generate_session_id;
///
/// let id = generate_session_id(32);
/// assert_eq!(id.expose_secret().len(), 43);
/// ```
pub fn generate_session_id(bytes: usize) -> SecretString {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    SecretString::new(URL_SAFE_NO_PAD.encode(buf))
}

/// Hashes `password` on tokio's blocking pool.
///
/// Key derivation must not run on an async worker thread.
///
/// # Errors
///
/// Returns `AuthError::PasswordHashError` if hashing fails or the worker dies.
pub async fn hash_password<H>(hasher: Arc<H>, password: SecretString) -> Result<String, AuthError>
where
    H: PasswordHasher + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
        .await
        .map_err(|e| {
            log::error!(target: "authcore", "msg=\"hash worker failed\" error=\"{e}\"");
            AuthError::PasswordHashError
        })?
}

/// Verifies `password` against `credential` on tokio's blocking pool.
///
/// # Errors
///
/// Same as [`PasswordHasher::verify`], plus `AuthError::PasswordHashError` if
/// the worker dies.
pub async fn verify_password<H>(
    hasher: Arc<H>,
    password: SecretString,
    credential: String,
) -> Result<bool, AuthError>
where
    H: PasswordHasher + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || hasher.verify(password.expose_secret(), &credential))
        .await
        .map_err(|e| {
            log::error!(target: "authcore", "msg=\"verify worker failed\" error=\"{e}\"");
            AuthError::PasswordHashError
        })?
}
