#[derive(Debug)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        match &self {
            Validity::Valid => true,
            Validity::Invalid(_) => false,
        }
    }
}

/// The display name is the only required profile field besides the email.
pub fn validate_display_name(name: &str) -> Validity {
    if name.trim().is_empty() {
        return Validity::Invalid(String::from("Name cannot be empty."));
    }

    if name.chars().count() > 255 {
        return Validity::Invalid(String::from("Name cannot be longer than 255 characters."));
    }

    Validity::Valid
}

pub fn validate_email_address(email: &str) -> Validity {
    if email.chars().count() > 320 {
        return Validity::Invalid(String::from(
            "Email address cannot be longer than 320 characters.",
        ));
    }

    for c in email.chars() {
        if c == ' ' || !c.is_ascii() {
            return Validity::Invalid(String::from(
                "Email address cannot contain a space or non-ASCII characters.",
            ));
        }
    }

    if email.contains("@.") {
        return Validity::Invalid(String::from(
            "Domain name in email address cannot begin with a period.",
        ));
    }

    let email = match email.split_once('@') {
        Some(s) => s,
        None => {
            return Validity::Invalid(String::from("Email address must contain an at symbol (@)."))
        }
    };

    if email.0.is_empty() || email.1.len() < 3 {
        return Validity::Invalid(String::from("Email username or domain name is too short."));
    }

    if email.1.contains('@') || !email.1.contains('.') {
        return Validity::Invalid(String::from(
            "Email address must have only one at symbol (@) and the domain must contain a period.",
        ));
    }

    if email.1.ends_with('.') {
        return Validity::Invalid(String::from("Email address cannot end with a period."));
    }

    Validity::Valid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_address() {
        // Valid
        const NORMAL: &str = "test@example.com";
        const WITH_DOT_IN_USERNAME: &str = "test.me@example.com";
        const MULTIPLE_DOT_DOMAIN: &str = "email@example.co.jp";
        const PLUS_IN_USERNAME: &str = "firstname+lastname@example.com";
        const NUMERIC_USERNAME: &str = "1234567890@example.co.uk";
        const DASH_IN_DOMAIN: &str = "email@example-one.com";

        assert!(validate_email_address(NORMAL).is_valid());
        assert!(validate_email_address(WITH_DOT_IN_USERNAME).is_valid());
        assert!(validate_email_address(MULTIPLE_DOT_DOMAIN).is_valid());
        assert!(validate_email_address(PLUS_IN_USERNAME).is_valid());
        assert!(validate_email_address(NUMERIC_USERNAME).is_valid());
        assert!(validate_email_address(DASH_IN_DOMAIN).is_valid());

        // Invalid
        const WITH_SPACE: &str = "test me@example.com";
        const MISSING_AT: &str = "testexample.com";
        const MISSING_DOMAIN_DOT: &str = "test@examplecom";
        const DOMAIN_STARTS_WITH_DOT: &str = "test@.example.com";
        const DOMAIN_ENDS_WITH_DOT: &str = "test@example.com.";
        const EMPTY_USERNAME: &str = "@example.com";
        const TWO_AT_SYMBOLS: &str = "test@exam@ple.com";
        const NON_ASCII: &str = "tëst@example.com";

        assert!(!validate_email_address(WITH_SPACE).is_valid());
        assert!(!validate_email_address(MISSING_AT).is_valid());
        assert!(!validate_email_address(MISSING_DOMAIN_DOT).is_valid());
        assert!(!validate_email_address(DOMAIN_STARTS_WITH_DOT).is_valid());
        assert!(!validate_email_address(DOMAIN_ENDS_WITH_DOT).is_valid());
        assert!(!validate_email_address(EMPTY_USERNAME).is_valid());
        assert!(!validate_email_address(TWO_AT_SYMBOLS).is_valid());

        match validate_email_address(NON_ASCII) {
            Validity::Invalid(msg) => assert!(msg.contains("non-ASCII")),
            Validity::Valid => panic!("non-ASCII email address passed validation"),
        }
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Ada Lovelace").is_valid());
        assert!(!validate_display_name("").is_valid());
        assert!(!validate_display_name("   ").is_valid());
        assert!(!validate_display_name(&"x".repeat(256)).is_valid());
    }
}
