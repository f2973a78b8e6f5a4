//! Secret masking for log output (bearer tokens, refresh tokens, API keys).

/// Masks a secret for logging: first 7 chars + `***` + last 4 chars.
/// Secrets of 11 chars or fewer (and anything that is not char-boundary safe) become `***`.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        return "***".to_string();
    }
    format!("{}***{}", &token[..7], &token[len - 4..])
}
