use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

// =============================================================================
// Password Digests
// =============================================================================

/// Digest a password with the server-side pepper
///
/// `digest = SHA256(password + pepper)`, hex encoded.
///
/// Login compares digests for equality, so the stored value never has to be
/// the plaintext password.
pub fn apply_pepper(password: &str, pepper: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(pepper.as_bytes());
    hex::encode(hasher.finalize())
}

// =============================================================================
// HMAC Signatures (Session Tokens)
// =============================================================================

/// Sign data with HMAC-SHA256, returning the hex signature
pub fn sign_hmac(data: &str, secret: &str) -> String {
    // HMAC accepts keys of any length, so this never fails
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return String::new();
        }
    };
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify HMAC-SHA256 signature
///
/// # Arguments
/// * `data` - The data that was signed
/// * `signature` - The hex-encoded HMAC signature
/// * `secret` - The signing secret (from environment)
pub fn verify_hmac(data: &str, signature: &str, secret: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            tracing::error!("Failed to create HMAC instance");
            return false;
        }
    };

    mac.update(data.as_bytes());

    let sig_bytes = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => {
            tracing::warn!("Invalid hex signature format");
            return false;
        }
    };

    // Constant-time comparison
    mac.verify_slice(&sig_bytes).is_ok()
}

/// Validate timestamp is within acceptable range of now
///
/// # Arguments
/// * `timestamp` - Unix timestamp in seconds
/// * `max_age_secs` - Maximum age allowed in seconds
pub fn validate_timestamp(timestamp: i64, max_age_secs: i64) -> bool {
    let now = chrono::Utc::now().timestamp();
    let age_seconds = (now - timestamp).abs();

    if age_seconds > max_age_secs {
        tracing::debug!(
            "Timestamp out of range: {} seconds (max: {})",
            age_seconds,
            max_age_secs
        );
        return false;
    }

    true
}
