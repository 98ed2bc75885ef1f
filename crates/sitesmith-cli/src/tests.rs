use super::*;
use crate::commands::{load_request, parse_request};

#[test]
fn parses_profile_command() {
    let cli = Cli::try_parse_from(["sitesmith-cli", "profile", "--input", "acme.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Profile { ref input } if input == &PathBuf::from("acme.yaml")
    ));
}

#[test]
fn parses_generate_with_out_dir() {
    let cli = Cli::try_parse_from([
        "sitesmith-cli",
        "generate",
        "-i",
        "acme.yaml",
        "--out-dir",
        "sites",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Generate { out_dir: Some(ref dir), .. } if dir == &PathBuf::from("sites")
    ));
}

#[test]
fn generate_out_dir_is_optional() {
    let cli = Cli::try_parse_from(["sitesmith-cli", "generate", "--input", "acme.yaml"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Generate { out_dir: None, .. }));
}

#[test]
fn input_is_required() {
    assert!(Cli::try_parse_from(["sitesmith-cli", "profile"]).is_err());
    assert!(Cli::try_parse_from(["sitesmith-cli"]).is_err());
}

#[test]
fn parses_full_request() {
    let input = parse_request(
        r##"
business_name: Acme Plumbing
category: plumber
location: Richmond
website_url: acmeplumbing.example
social_handle: "@acmeplumbing"
competitor_urls:
  - https://rival.example
preferences:
  colors: ["#1e3a5f", "#f59e0b"]
  tone: friendly
  usps: [Same-day service]
contact:
  phone: "804-555-0100"
"##,
    )
    .expect("valid request");

    assert_eq!(input.business_name, "Acme Plumbing");
    assert_eq!(input.location.as_deref(), Some("Richmond"));
    assert_eq!(input.preferences.colors.len(), 2);
    assert_eq!(input.competitor_urls, vec!["https://rival.example"]);
    assert_eq!(input.contact.phone.as_deref(), Some("804-555-0100"));
    assert!(input.preferences.services.is_empty());
}

#[test]
fn request_needs_name_and_category() {
    assert!(parse_request("category: plumber").is_err());
    assert!(parse_request("business_name: Acme\ncategory: '  '").is_err());
}

#[test]
fn load_request_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = load_request(&dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read request file"));
}

#[test]
fn load_request_reads_yaml_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("acme.yaml");
    std::fs::write(&path, "business_name: Acme\ncategory: bakery\n").expect("write request");
    let input = load_request(&path).expect("valid request");
    assert_eq!(input.category, "bakery");
}
