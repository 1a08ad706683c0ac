//! Vanity link generation.
//!
//! Generated links are 7 characters over `[A-Za-z0-9]`. Each character is
//! picked by drawing a random `u64` and reducing it modulo the alphabet size.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::{LazyLock, Mutex, PoisonError};

/// Characters a generated vanity link is drawn from.
pub const VANITY_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of a generated vanity link.
pub const VANITY_LENGTH: usize = 7;

/// Process-wide CSPRNG, seeded once from the operating system.
static VANITY_RNG: LazyLock<Mutex<StdRng>> = LazyLock::new(|| Mutex::new(StdRng::from_os_rng()));

/// Generates a random vanity link from the shared generator.
///
/// Collisions with existing bundles are not checked here; the store rejects
/// a duplicate on insert.
///
/// # Examples
///
/// ```
/// use linkylink::utils::vanity::generate_vanity_url;
///
/// let code = generate_vanity_url();
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_vanity_url() -> String {
    let mut rng = VANITY_RNG.lock().unwrap_or_else(PoisonError::into_inner);
    generate_vanity_url_with(&mut *rng)
}

/// Generates a vanity link from the given random source.
pub fn generate_vanity_url_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    (0..VANITY_LENGTH)
        .map(|_| {
            let index = (rng.next_u64() % VANITY_ALPHABET.len() as u64) as usize;
            VANITY_ALPHABET[index] as char
        })
        .collect()
}

/// Returns true when the caller left the vanity link for us to pick.
pub fn is_blank(vanity_url: Option<&str>) -> bool {
    vanity_url.is_none_or(|v| v.trim().is_empty())
}
