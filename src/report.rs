//! Output formatting for doccheck results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};

use crate::check::{Issue, IssueKind, Report, Severity, Subject};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    pub passed: bool,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub issues: Vec<JsonIssue>,
    pub summary: Vec<SummaryEntry>,
}

/// One issue as consumed by external tools.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonIssue {
    pub kind: String,
    pub severity: String,
    pub file: String,
    pub line: usize,
    pub message: String,
    pub subject: Subject,
}

/// Issue count for one kind.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub kind: String,
    pub severity: String,
    pub issues: usize,
}

/// Build the JSON report structure.
pub fn build_json(path: &str, config_path: Option<&str>, report: &Report) -> JsonReport {
    let issues = report.issues.iter().map(issue_to_json).collect();

    // Only kinds that actually occurred, in declaration order
    let summary = IssueKind::ALL
        .iter()
        .filter_map(|kind| {
            let count = report.count(*kind);
            (count > 0).then(|| SummaryEntry {
                kind: kind.as_str().to_string(),
                severity: kind.severity().to_string(),
                issues: count,
            })
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.map(str::to_string),
        passed: report.is_clean(),
        files_scanned: report.scanned,
        files_failed: report.failed,
        issues,
        summary,
    }
}

pub fn to_json_string(
    path: &str,
    config_path: Option<&str>,
    report: &Report,
) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(&build_json(path, config_path, report))?;
    Ok(json)
}

/// Write results in JSON format.
pub fn write_json(path: &str, config_path: Option<&str>, report: &Report) -> anyhow::Result<()> {
    println!("{}", to_json_string(path, config_path, report)?);
    Ok(())
}

fn issue_to_json(issue: &Issue) -> JsonIssue {
    JsonIssue {
        kind: issue.kind.as_str().to_string(),
        severity: issue.severity().to_string(),
        file: issue.file.clone(),
        line: issue.line,
        message: issue.message.clone(),
        subject: issue.subject.clone(),
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "doccheck";
const INFO_URI: &str = "https://learn.microsoft.com/dotnet/csharp/language-reference/xmldoc/";

#[derive(Serialize, Deserialize)]
struct SarifReport {
    version: String,
    #[serde(rename = "$schema")]
    schema: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "fullDescription", skip_serializing_if = "Option::is_none")]
    full_description: Option<SarifMessage>,
    #[serde(rename = "helpUri", skip_serializing_if = "Option::is_none")]
    help_uri: Option<String>,
    #[serde(rename = "defaultConfiguration")]
    default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
struct SarifRuleConfig {
    level: String,
}

#[derive(Serialize, Deserialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifact,
    region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
struct SarifArtifact {
    uri: String,
}

#[derive(Serialize, Deserialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

/// Rule metadata for SARIF output.
struct RuleInfo {
    name: &'static str,
    short_description: &'static str,
    full_description: &'static str,
    help_uri: &'static str,
}

fn get_rule_info(kind: IssueKind) -> RuleInfo {
    match kind {
        IssueKind::MissingDocumentation => RuleInfo {
            name: "MissingDocumentation",
            short_description: "Declaration has no XML documentation comment",
            full_description: "Classes, properties, and methods must be preceded by an XML documentation comment (/// or /** */).",
            help_uri: "",
        },
        IssueKind::MissingElement => RuleInfo {
            name: "MissingElement",
            short_description: "Documentation lacks a required element",
            full_description: "Types and methods need <summary>, properties need <summary> or <value>, and methods that return a value need <returns>.",
            help_uri: "recommended-tags",
        },
        IssueKind::MissingParam => RuleInfo {
            name: "MissingParam",
            short_description: "Method parameter is not documented",
            full_description: "Every method parameter needs a <param> element whose name attribute matches the parameter name.",
            help_uri: "recommended-tags#param",
        },
        IssueKind::OrphanDeclaration => RuleInfo {
            name: "OrphanDeclaration",
            short_description: "Member declared outside of any type",
            full_description: "A property or method was found with no enclosing type, usually because the source could not be fully parsed.",
            help_uri: "",
        },
        IssueKind::UnitFailure => RuleInfo {
            name: "UnitFailure",
            short_description: "Source file could not be analyzed",
            full_description: "The file could not be read or parsed, so its declarations were not checked.",
            help_uri: "",
        },
    }
}

fn map_severity_to_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn build_sarif(report: &Report) -> SarifReport {
    // Only rules that produced results
    let rules: Vec<SarifRule> = IssueKind::ALL
        .into_iter()
        .filter(|kind| report.count(*kind) > 0)
        .map(|kind| {
            let info = get_rule_info(kind);
            SarifRule {
                id: kind.as_str().to_string(),
                name: info.name.to_string(),
                short_description: SarifMessage {
                    text: info.short_description.to_string(),
                },
                full_description: Some(SarifMessage {
                    text: info.full_description.to_string(),
                }),
                help_uri: if info.help_uri.is_empty() {
                    Some(INFO_URI.to_string())
                } else {
                    Some(format!("{}{}", INFO_URI, info.help_uri))
                },
                default_config: SarifRuleConfig {
                    level: map_severity_to_level(kind.severity()).to_string(),
                },
            }
        })
        .collect();

    let results: Vec<SarifResult> = report
        .issues
        .iter()
        .map(|issue| SarifResult {
            rule_id: issue.kind.as_str().to_string(),
            level: map_severity_to_level(issue.severity()).to_string(),
            message: SarifMessage {
                text: issue.message.clone(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: issue.file.replace('\\', "/"),
                    },
                    region: SarifRegion {
                        start_line: if issue.line > 0 { issue.line } else { 1 },
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: INFO_URI.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

pub fn to_sarif_string(report: &Report) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(&build_sarif(report))?;
    Ok(json)
}

/// Write results in SARIF format.
pub fn write_sarif(report: &Report) -> anyhow::Result<()> {
    println!("{}", to_sarif_string(report)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, config_path: Option<&str>, report: &Report) {
    // Header
    println!();
    print!("  ");
    print!("{}", "doccheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Checking: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path.unwrap_or("(defaults)"));
    println!();

    write_result_summary(report);
    println!();

    if !report.issues.is_empty() {
        write_issues(&report.issues);
        println!();
        write_breakdown(report);
        println!();
    }
}

fn write_result_summary(report: &Report) {
    if report.is_clean() {
        print!("  {}", "✓ PASS".green());
    } else {
        print!("  {}", "✗ FAIL".red());
    }

    let plural = if report.scanned != 1 { "s" } else { "" };
    print!("  {} file{} checked", report.scanned, plural);

    if report.failed > 0 {
        print!("  {}", format!("({} failed)", report.failed).red());
    }

    let count = report.issues.len();
    if count > 0 {
        let plural = if count != 1 { "s" } else { "" };
        print!("  {} issue{}", count.to_string().bold(), plural);
    }

    println!();
}

fn write_issues(issues: &[Issue]) {
    println!("  {} ({}):", "Issues".bold(), issues.len());
    println!();

    for issue in issues {
        write_severity_tag(issue.severity());
        print!("   ");
        print!("{:<22}", issue.kind.as_str().dimmed());
        print!("{}", issue.file.blue());
        if issue.line > 0 {
            print!("{}", format!(":{}", issue.line).dimmed());
        }
        println!();

        // Message on next line, indented
        println!("            {}", issue.message);
        println!();
    }
}

fn write_severity_tag(severity: Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
    }
}

fn write_breakdown(report: &Report) {
    println!("  {}", "Breakdown:".bold());

    for kind in IssueKind::ALL {
        let count = report.count(kind);
        if count == 0 {
            continue;
        }
        let plural = if count != 1 { "s" } else { "" };
        println!("    {:<22} {:>4} issue{}", kind.as_str(), count, plural);
    }
}
