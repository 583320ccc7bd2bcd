//! Small formatting helpers.

/// Number of characters kept at each end of a masked token.
const MASK_VISIBLE: usize = 4;

/// Masks a credential for display: `abcd****wxyz`.
///
/// Tokens of eight characters or fewer are fully masked.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= MASK_VISIBLE * 2 {
        return "****".to_string();
    }
    let head: String = chars[..MASK_VISIBLE].iter().collect();
    let tail: String = chars[chars.len() - MASK_VISIBLE..].iter().collect();
    format!("{head}****{tail}")
}

/// Describes an optional token for banners: masked value or `none`.
pub fn describe_token(token: Option<&str>) -> String {
    token.map_or_else(|| "none".to_string(), mask_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_tokens() {
        assert_eq!(mask_token("ghp_1234567890abcdef"), "ghp_****cdef");
    }

    #[test]
    fn short_tokens_fully_masked() {
        assert_eq!(mask_token("12345678"), "****");
        assert_eq!(mask_token(""), "****");
    }

    #[test]
    fn masks_by_character() {
        assert_eq!(mask_token("令牌令牌abc令牌令牌"), "令牌令牌****令牌令牌");
    }

    #[test]
    fn describe_missing_token() {
        assert_eq!(describe_token(None), "none");
        assert_eq!(describe_token(Some("abcdefghijkl")), "abcd****ijkl");
    }
}
