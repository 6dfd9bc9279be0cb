// ============================================================================
// JWT - Client-side payload decoding (no signature verification)
// ============================================================================

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::models::TokenClaims;

/// Decode the claims segment of a `header.payload.signature` token.
///
/// Accepts base64url or standard base64, with or without padding. Any
/// structural problem, bad encoding or missing `sub`/`role` yields `None`.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (_header, payload) = (parts.next()?, parts.next()?);
    if payload.is_empty() {
        return None;
    }

    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes()).ok()?;
    serde_json::from_slice::<TokenClaims>(&bytes).ok()
}
