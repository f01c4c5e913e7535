//! Bearer credential extraction from a raw `Authorization` header value.

use crate::AuthError;

pub const BEARER_SCHEME: &str = "Bearer";

const MSG_HEADER_NOT_FOUND: &str = "Authorization header not found.";
const MSG_NOT_BEARER: &str = "Authorization header is not of type 'Bearer'.";
const MSG_TOO_MANY_PARTS: &str = "Authorization header value has too many parts. It must follow the pattern: 'Bearer xx.yy.zz' where xx.yy.zz is a valid JWT token.";

/// Pull the token out of `Bearer <token>`.
///
/// Stricter than generic bearer parsing: the value must split on `' '` into
/// exactly two parts. The token is returned verbatim (not trimmed, not
/// checked for shape); an empty token is left for the codec to reject.
pub fn extract_credentials(authorization: Option<&str>) -> Result<&str, AuthError> {
    let value = authorization.ok_or_else(|| AuthError::unauthorized(MSG_HEADER_NOT_FOUND))?;

    if !value.starts_with(BEARER_SCHEME) {
        return Err(AuthError::unauthorized(MSG_NOT_BEARER));
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(token), None) => Ok(token),
        _ => Err(AuthError::unauthorized(MSG_TOO_MANY_PARTS)),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn message(res: Result<&str, AuthError>) -> String {
        res.unwrap_err().to_string()
    }

    #[test]
    fn returns_token_after_scheme() {
        assert_eq!(extract_credentials(Some("Bearer a.b.c")), Ok("a.b.c"));
    }

    #[test]
    fn missing_header() {
        assert_eq!(message(extract_credentials(None)), "Authorization header not found.");
    }

    #[test]
    fn wrong_scheme() {
        assert_eq!(
            message(extract_credentials(Some("Token abc.def.ghi"))),
            "Authorization header is not of type 'Bearer'."
        );
        assert!(extract_credentials(Some("bearer a.b.c")).is_err());
    }

    #[test]
    fn too_many_parts() {
        let msg = message(extract_credentials(Some("Bearer a b")));
        assert_eq!(
            msg,
            "Authorization header value has too many parts. It must follow the pattern: 'Bearer xx.yy.zz' where xx.yy.zz is a valid JWT token."
        );
        // Double space yields an empty middle part, so three parts.
        assert!(extract_credentials(Some("Bearer  a.b.c")).is_err());
        // Scheme alone is a single part.
        assert!(extract_credentials(Some("Bearer")).is_err());
    }

    #[test]
    fn empty_token_passes_through() {
        assert_eq!(extract_credentials(Some("Bearer ")), Ok(""));
    }

    #[test]
    fn prefix_check_is_literal() {
        // Only the prefix is checked, not a word boundary.
        assert_eq!(extract_credentials(Some("BearerX tok")), Ok("tok"));
    }

    proptest! {
        #[test]
        fn any_single_space_free_token_round_trips(token in "[A-Za-z0-9._~+/=-]{0,64}") {
            let header = format!("Bearer {token}");
            prop_assert_eq!(extract_credentials(Some(header.as_str())), Ok(token.as_str()));
        }

        #[test]
        fn extra_spaces_are_always_rejected(a in "[a-z.]{0,8}", b in "[a-z.]{0,8}") {
            let header = format!("Bearer {a} {b}");
            prop_assert!(extract_credentials(Some(header.as_str())).is_err());
        }
    }
}
