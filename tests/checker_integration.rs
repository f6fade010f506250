//! Integration tests running the checker over the C# fixtures in testdata/.

use std::path::PathBuf;

use doccheck::check::{Checker, IssueKind, Report};
use doccheck::config::Config;
use doccheck::frontend::{CSharpFrontEnd, FrontEnd, SourceUnit};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn load_config() -> Config {
    Config::parse_file(testdata_path().join("doccheck.yaml")).expect("should parse config")
}

/// Discover the fixture project the way the CLI does.
fn billing_units(config: &Config) -> Vec<SourceUnit> {
    let front_end = CSharpFrontEnd::new();
    let mut units = front_end
        .discover(&testdata_path().join("Billing/Billing.csproj"))
        .expect("discovery should succeed");
    let excluded = config.excluded_paths_matcher().unwrap();
    units.retain(|u| !excluded.is_match(&u.name));
    units
}

async fn run_check(config: &Config) -> Report {
    let units = billing_units(config);
    let checker = Checker::from_config(config).expect("config should build a checker");
    checker.check(&CSharpFrontEnd::new(), &units).await
}

#[tokio::test]
async fn test_billing_issues_in_order() {
    let report = run_check(&load_config()).await;

    let messages: Vec<_> = report.issues.iter().map(|i| i.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            // Customer.cs: types, then properties, then methods
            "Class Customer does not have any XML comments",
            "Class Address does not have a <summary> element in its XML comments",
            "Property Email in Customer does not have any XML comments",
            "Property Tier in Customer does not have a <summary> or <value> element in its XML comments",
            "Method ApplyDiscount in Customer does not have a <param> element for parameter roundUp in its XML comments",
            "Method Reset in Customer does not have any XML comments",
            "Method Merge in Customer does not have a <param> element for parameter other in its XML comments",
            "Method Merge in Customer does not have a <returns> element in its XML comments",
        ]
    );

    assert!(report.issues.iter().all(|i| i.file == "Customer.cs"));
    assert_eq!(report.scanned, 2);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn test_issue_locations_and_subjects() {
    let report = run_check(&load_config()).await;

    let customer = &report.issues[0];
    assert_eq!(customer.kind, IssueKind::MissingDocumentation);
    assert_eq!(customer.line, 5);
    assert_eq!(customer.subject.enclosing_type, None);

    let round_up = report
        .issues
        .iter()
        .find(|i| i.kind == IssueKind::MissingParam)
        .unwrap();
    assert_eq!(round_up.line, 20);
    assert_eq!(round_up.subject.name, "ApplyDiscount");
    assert_eq!(round_up.subject.enclosing_type.as_deref(), Some("Customer"));
    assert_eq!(round_up.subject.parameter.as_deref(), Some("roundUp"));
}

#[tokio::test]
async fn test_documented_file_is_clean() {
    let front_end = CSharpFrontEnd::new();
    let units = front_end
        .discover(&testdata_path().join("Billing/Invoice.cs"))
        .unwrap();
    let report = Checker::new().check(&front_end, &units).await;

    assert_eq!(report.scanned, 1);
    assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
}

#[tokio::test]
async fn test_excluded_paths_are_not_checked() {
    let with_exclusions = run_check(&load_config()).await;
    let without = run_check(&Config::default()).await;

    assert_eq!(without.scanned, 3);
    assert!(without.issues.iter().any(|i| i.file == "Migrations/Initial.cs"));
    assert!(with_exclusions
        .issues
        .iter()
        .all(|i| i.file != "Migrations/Initial.cs"));
}

#[tokio::test]
async fn test_rule_toggles_from_config() {
    let mut config = load_config();
    config.rules.require_param_elements = false;
    config.rules.require_returns_element = false;
    config.excluded_declarations = vec!["^Reset$".to_string()];

    let report = run_check(&config).await;
    assert_eq!(report.count(IssueKind::MissingParam), 0);
    assert!(report.issues.iter().all(|i| !i.message.contains("<returns>")));
    assert!(report.issues.iter().all(|i| i.subject.name != "Reset"));
    assert_eq!(report.issues.len(), 4);
}

#[tokio::test]
async fn test_unreadable_unit_is_reported_and_run_continues() {
    let mut units = billing_units(&load_config());
    units.insert(0, SourceUnit::new(testdata_path().join("Billing/Gone.cs"), "Gone.cs"));

    let report = Checker::new().check(&CSharpFrontEnd::new(), &units).await;
    assert_eq!(report.scanned, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(report.issues[0].kind, IssueKind::UnitFailure);
    assert!(report.issues[0]
        .message
        .starts_with("Source unit Gone.cs could not be analyzed:"));
    // Customer, Email, and Reset in Customer.cs
    assert_eq!(report.count(IssueKind::MissingDocumentation), 3);
}

#[tokio::test]
async fn test_runs_are_idempotent() {
    let config = load_config();
    let first = run_check(&config).await;
    let second = run_check(&config).await;
    assert_eq!(first, second);
}

#[test]
fn test_undocumented_params_array_is_reported() {
    let source = br#"
/// <summary>Sums.</summary>
public class Calc
{
    /// <summary>Adds.</summary>
    /// <param name="a">First.</param>
    /// <returns>Total.</returns>
    public int F(int a, params int[] rest) { return a; }
}
"#;
    let tree = CSharpFrontEnd::new()
        .parse_source("Calc.cs", source)
        .expect("C# grammar should load");
    let issues = Checker::new().check_tree(&tree);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].kind, IssueKind::MissingParam);
    assert_eq!(issues[0].subject.parameter.as_deref(), Some("rest"));
}

#[test]
fn test_region_does_not_detach_documentation() {
    let source = br#"
/// <summary>Foo.</summary>
public class Foo
{
    /// <summary>s</summary>
    #region Props
    public int X { get; set; }
    #endregion
}
"#;
    let tree = CSharpFrontEnd::new()
        .parse_source("Foo.cs", source)
        .expect("C# grammar should load");
    let issues = Checker::new().check_tree(&tree);
    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
}
