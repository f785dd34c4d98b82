use super::*;

#[test]
fn validate_login_input_trims_username_only() {
    assert_eq!(
        validate_login_input("  admin ", " secret "),
        Ok(("admin".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw"), Err("Enter your username."));
    assert_eq!(validate_login_input("admin", ""), Err("Enter your password."));
}
