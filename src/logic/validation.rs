//! Input validation for the submit gate
//!
//! Each check returns the precise [`KickstartError`] the form shows as a
//! notice. The checks are independent so the request builder can collect
//! every failure at once.

use crate::error::{KickstartError, Result};
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// Minimum root/bootloader password length.
pub const MIN_PASSWORD_LEN: usize = 15;

static HOSTNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\-.]{1,100}$").expect("valid hostname regex"));

/// Letters, digits, `-` and `.` only, 1 to 100 characters.
pub fn check_hostname(hostname: &str) -> Result<()> {
    if HOSTNAME_RE.is_match(hostname) {
        Ok(())
    } else {
        Err(KickstartError::InvalidHostname(hostname.to_string()))
    }
}

/// Compare the two password entries.
///
/// An empty matching pair means the operator backed out: `Ok(None)`.
pub fn check_password(first: &str, second: &str) -> Result<Option<String>> {
    if first != second {
        return Err(KickstartError::PasswordMismatch);
    }
    if first.is_empty() {
        return Ok(None);
    }
    if first.chars().count() < MIN_PASSWORD_LEN {
        return Err(KickstartError::PasswordTooShort {
            required: MIN_PASSWORD_LEN,
        });
    }
    Ok(Some(first.to_string()))
}

/// At least one disk must be marked for install.
pub fn check_disks<I>(selected: I) -> Result<()>
where
    I: IntoIterator<Item = bool>,
{
    if selected.into_iter().any(|s| s) {
        Ok(())
    } else {
        Err(KickstartError::NoDiskSelected)
    }
}

/// Dotted-quad IPv4 address or netmask, anything but `0.0.0.0`.
pub fn check_ip(address: &str) -> Result<Ipv4Addr> {
    match address.trim().parse::<Ipv4Addr>() {
        Ok(ip) if !ip.is_unspecified() => Ok(ip),
        _ => Err(KickstartError::InvalidAddress(address.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hostname() {
        assert!(check_hostname("web-01.example").is_ok());
        assert!(check_hostname("localhost.localdomain").is_ok());
        assert!(matches!(
            check_hostname("web_01!"),
            Err(KickstartError::InvalidHostname(_))
        ));
        assert!(check_hostname("").is_err());
        assert!(check_hostname(&"a".repeat(100)).is_ok());
        assert!(check_hostname(&"a".repeat(101)).is_err());
        assert!(check_hostname("host name").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(matches!(
            check_password("short12345678", "short12345678"),
            Err(KickstartError::PasswordTooShort { required: 15 })
        ));
        let long = "A".repeat(15);
        assert_eq!(check_password(&long, &long).unwrap(), Some(long.clone()));
        assert!(matches!(
            check_password("abc", "xyz"),
            Err(KickstartError::PasswordMismatch)
        ));
        assert_eq!(check_password("", "").unwrap(), None);
    }

    #[test]
    fn test_mismatch_wins_over_length() {
        assert!(matches!(
            check_password("", "x"),
            Err(KickstartError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_disks() {
        assert!(check_disks([false, true]).is_ok());
        assert!(matches!(
            check_disks([false, false]),
            Err(KickstartError::NoDiskSelected)
        ));
        assert!(check_disks(Vec::<bool>::new()).is_err());
    }

    #[test]
    fn test_ip() {
        assert!(check_ip("192.168.1.101").is_ok());
        assert!(check_ip("255.255.255.0").is_ok());
        assert!(check_ip("10.0.0.254").is_ok());
        assert!(check_ip("0.0.0.0").is_err());
        assert!(check_ip("256.1.1.1").is_err());
        assert!(check_ip("10.0.0").is_err());
    }

    proptest! {
        #[test]
        fn prop_hostname_alphabet_accepted(name in "[a-zA-Z0-9.-]{1,100}") {
            prop_assert!(check_hostname(&name).is_ok());
        }

        #[test]
        fn prop_hostname_rejects_other_chars(
            prefix in "[a-z]{0,10}",
            bad in "[_ !@#$%^&*()/]",
            suffix in "[a-z]{0,10}",
        ) {
            let name = format!("{}{}{}", prefix, bad, suffix);
            prop_assert!(check_hostname(&name).is_err());
        }
    }
}
