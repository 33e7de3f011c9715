//! Environment layer of the settings.
//!
//! Lives in its own test binary so the variables it sets cannot leak into
//! the file-only tests of `config.rs`.

use std::io::Write;

use transformer_cli::Settings;

#[test]
fn test_environment_overrides_file_and_keeps_secret_verbatim() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "secret = \"from-file\"").unwrap();
    writeln!(file, "api_timeout = 5").unwrap();
    file.flush().unwrap();

    std::env::set_var("TRANSFORMER_SECRET", "000123");
    std::env::set_var("TRANSFORMER_API_TIMEOUT", "7");

    let settings = Settings::load(Some(file.path()));

    std::env::remove_var("TRANSFORMER_SECRET");
    std::env::remove_var("TRANSFORMER_API_TIMEOUT");

    let settings = settings.unwrap();
    // Leading zeros must survive: the secret is a string, not a number.
    assert_eq!(settings.secret, "000123");
    assert_eq!(settings.api_timeout, 7);
    assert_eq!(settings.delivery_timeout, 30);
}
