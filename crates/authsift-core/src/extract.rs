//! Entity extractors: source address and target account.
//!
//! Each extractor is an ordered list of patterns; the first one that matches
//! wins and its first capture group is returned. When nothing matches the
//! result is the empty string. Matching is case-sensitive.

use regex::Regex;
use std::sync::LazyLock;

const IPV4: &str = r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}";

/// `from <ip>`, then PAM's `rhost=<ip>`, then a bracketed `[<ip>]`.
static ADDRESS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        format!(r"from\s+({IPV4})"),
        format!(r"rhost=?({IPV4})"),
        format!(r"\[({IPV4})\]"),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("regex"))
    .collect()
});

/// sshd phrasing first, then PAM's `user=`, then the bare `Invalid user`
/// notice emitted before authentication starts.
static ACCOUNT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"for\s+invalid\s+user\s+(\S+)",
        r"for\s+user\s+(\S+)",
        r"for\s+(\w+)\s+from",
        r"user=(\S+)",
        r"invalid\s+user\s+(\S+)\s+\[preauth\]",
        r"[Ii]nvalid\s+user\s+(\S+)\s+from",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("regex"))
    .collect()
});

fn first_capture<'m>(patterns: &[Regex], message: &'m str) -> &'m str {
    patterns
        .iter()
        .find_map(|re| re.captures(message).and_then(|c| c.get(1)))
        .map_or("", |m| m.as_str())
}

/// Source IPv4 address named in `message`, or `""`.
pub fn extract_address(message: &str) -> &str {
    first_capture(&ADDRESS_PATTERNS, message)
}

/// Target account named in `message`, or `""`.
pub fn extract_account(message: &str) -> &str {
    first_capture(&ACCOUNT_PATTERNS, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Failed password for root from 10.0.0.5 port 22 ssh2", "10.0.0.5")]
    #[case("Invalid user admin from 203.0.113.7", "203.0.113.7")]
    #[case(
        "pam_unix(sshd:auth): authentication failure; logname= uid=0 euid=0 tty=ssh ruser= rhost=112.95.230.3  user=root",
        "112.95.230.3"
    )]
    #[case(
        "reverse mapping checking getaddrinfo for host.example [183.62.140.253] failed - POSSIBLE BREAK-IN ATTEMPT!",
        "183.62.140.253"
    )]
    #[case("Server listening on 0.0.0.0 port 22.", "")]
    #[case("Received disconnect from 0.0.0.0: 11: Bye Bye [preauth]", "0.0.0.0")]
    fn extracts_address(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(extract_address(message), expected);
    }

    #[test]
    fn address_prefers_from_over_rhost() {
        let msg = "check from 1.1.1.1 rhost=2.2.2.2 [3.3.3.3]";
        assert_eq!(extract_address(msg), "1.1.1.1");
        assert_eq!(extract_address("rhost=2.2.2.2 [3.3.3.3]"), "2.2.2.2");
    }

    #[rstest]
    #[case("Failed password for root from 10.0.0.5 port 22 ssh2", "root")]
    #[case("Failed password for invalid user admin from 10.0.0.5 port 22 ssh2", "admin")]
    #[case("Invalid user admin from 203.0.113.7", "admin")]
    #[case("pam_unix(sshd:session): session opened for user fztu by (uid=0)", "fztu")]
    #[case(
        "PAM 5 more authentication failures; logname= uid=0 euid=0 tty=ssh ruser= rhost=1.2.3.4  user=root",
        "root"
    )]
    #[case("input_userauth_request: invalid user oracle [preauth]", "oracle")]
    #[case("Connection closed by 173.234.31.186 [preauth]", "")]
    fn extracts_account(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(extract_account(message), expected);
    }

    #[test]
    fn extraction_is_repeatable() {
        let msg = "Failed password for invalid user test from 5.6.7.8 port 1 ssh2";
        assert_eq!(extract_address(msg), extract_address(msg));
        assert_eq!(extract_account(msg), extract_account(msg));
    }
}
