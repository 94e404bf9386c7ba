//! Field validation rules
//!
//! Each rule is a pure function of the value just entered and returns the
//! message to show under the field, or `None` when the value is acceptable.
//! These mirror the server's rules and are advisory only.

pub const NAME_MIN_CHARS: usize = 3;
pub const NAME_MAX_CHARS: usize = 25;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 20;

pub const NAME_TOO_SHORT: &str = "Name must contain atleast 3 characters.";
pub const NAME_TOO_LONG: &str = "Name must contain atmost 25 characters.";
pub const EMAIL_INVALID: &str = "Please enter valid email address";
pub const PASSWORD_LENGTH: &str = "Password must be of 6 to 20 characters";

const EMAIL_MAX_LEN: usize = 254;
const LOCAL_PART_MAX_LEN: usize = 64;
const DOMAIN_MAX_LEN: usize = 255;
const LABEL_MAX_LEN: usize = 63;

/// Validate a display name
pub fn validate_name(value: &str) -> Option<&'static str> {
    let len = value.trim().chars().count();
    if len < NAME_MIN_CHARS {
        Some(NAME_TOO_SHORT)
    } else if len > NAME_MAX_CHARS {
        Some(NAME_TOO_LONG)
    } else {
        None
    }
}

/// Validate an email address
pub fn validate_email(value: &str) -> Option<&'static str> {
    if is_valid_email(value.trim()) {
        None
    } else {
        Some(EMAIL_INVALID)
    }
}

/// Validate a password
pub fn validate_password(value: &str) -> Option<&'static str> {
    let len = value.trim().chars().count();
    if (PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&len) {
        None
    } else {
        Some(PASSWORD_LENGTH)
    }
}

/// Check an address against the usual `local@domain.tld` grammar
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX_LEN {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > LOCAL_PART_MAX_LEN {
        return false;
    }
    // Dot-atoms: no leading, trailing or doubled dots
    local
        .split('.')
        .all(|atom| !atom.is_empty() && atom.chars().all(is_atext))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > DOMAIN_MAX_LEN {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= LABEL_MAX_LEN
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    });

    let tld_ok = labels.last().is_some_and(|tld| {
        tld.len() >= 2 && tld.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
    });

    labels_ok && tld_ok
}
