use hmac::{Hmac, Mac};
use ruint::aliases::U256;
use sha2::Sha256;

use crate::encrypt::k256::N;

type HmacSha256 = Hmac<Sha256>;

fn hmac(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC takes keys of any length");
    for part in parts {
        mac.update(part);
    }

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Per-message nonce derived from the secret and the message hash with
/// HMAC-SHA256, so the same pair always yields the same `k` and two
/// different messages never share one.
///
/// A `z` at or above `N` is reduced once before hashing. The result is
/// always in `1..N`.
pub fn deterministic_k(secret: U256, z: U256) -> U256 {
    let z = if z >= N { z - N } else { z };
    let secret_bytes = secret.to_be_bytes::<32>();
    let z_bytes = z.to_be_bytes::<32>();

    let mut k = [0x00u8; 32];
    let mut v = [0x01u8; 32];

    k = hmac(&k, &[&v, &[0x00], &secret_bytes, &z_bytes]);
    v = hmac(&k, &[&v]);
    k = hmac(&k, &[&v, &[0x01], &secret_bytes, &z_bytes]);
    v = hmac(&k, &[&v]);

    loop {
        v = hmac(&k, &[&v]);
        let candidate = U256::from_be_bytes(v);
        if candidate != U256::ZERO && candidate < N {
            return candidate;
        }

        tracing::trace!("nonce candidate outside 1..N, reseeding");
        k = hmac(&k, &[&v, &[0x00]]);
        v = hmac(&k, &[&v]);
    }
}
