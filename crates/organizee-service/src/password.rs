use sha2::Sha256;

const ROUNDS: u32 = 10000;

/// Hash a password with a fresh random salt. The result is
/// "salt$key" with both parts hex encoded.
pub fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    let key = derive_key(password, &salt);
    format!("{}${}", hex::encode(salt), hex::encode(key))
}

/// Check a password against a stored "salt$key" hash. Anything
/// that does not parse as such a hash never matches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let (salt, key) = match stored.split_once('$') {
        Some(parts) => parts,
        None => return false,
    };
    let salt = match hex::decode(salt) {
        Ok(salt) => salt,
        Err(_) => return false,
    };
    hex::encode(derive_key(password, &salt)) == key
}

// Derive the key using pbkdf2 hmac with sha256
fn derive_key(password: &str, salt: &[u8]) -> [u8; 32] {
    let mut key = [0u8; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ROUNDS, &mut key);
    key
}
