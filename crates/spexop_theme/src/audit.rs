//! Accessibility auditing
//!
//! Runs a fixed battery of foreground/`surface` contrast checks over a theme
//! and reports every failure or near miss as an [`AuditIssue`]. Audits never
//! fail: unresolvable references, missing roles and unparseable colors are
//! reported as issues of their own.

use crate::color::{parse_color, Rgb};
use crate::contrast::{adjust_for_contrast_either_way, contrast_ratio, TextSize, WcagLevel, UI_COMPONENT_MIN_RATIO};
use crate::resolve::resolve_theme_tokens_lenient;
use crate::tokens::{ColorRole, ThemeColors, ThemeConfig, TokenValue, SEMANTIC_COLOR_ROLES};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

/// Ratios meeting a minimum by less than this are reported as warnings.
pub const BORDERLINE_MARGIN: f64 = 0.2;

const NON_TEXT_CRITERION: &str = "1.4.11 Non-text Contrast";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Contrast,
    /// Missing roles, unresolved references and unparseable colors
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditIssue {
    /// `colors.text / colors.surface` for contrast issues, the offending
    /// field otherwise
    pub field: String,
    pub category: IssueCategory,
    pub severity: IssueSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wcag_criterion: Option<&'static str>,
    pub message: String,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    /// Contrast checks in the battery, including those that could not run
    pub total_checks: usize,
    pub passed: usize,
    /// Error-severity issues, structural ones included
    pub failed: usize,
    pub warnings: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityAuditResult {
    /// No error-severity issue was found
    pub passed: bool,
    pub level: WcagLevel,
    /// Percentage of battery checks that passed cleanly
    pub pass_rate: f64,
    pub issues: Vec<AuditIssue>,
    pub summary: AuditSummary,
}

impl AccessibilityAuditResult {
    pub fn errors(&self) -> impl Iterator<Item = &AuditIssue> {
        self.issues.iter().filter(|i| i.severity == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &AuditIssue> {
        self.issues.iter().filter(|i| i.severity == IssueSeverity::Warning)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Threshold {
    Text(TextSize),
    NonText,
}

impl Threshold {
    fn min_ratio(self, level: WcagLevel) -> f64 {
        match self {
            Self::Text(size) => level.min_ratio(size),
            Self::NonText => UI_COMPONENT_MIN_RATIO,
        }
    }

    /// The AA minimum, below which a check is a hard failure.
    fn floor(self) -> f64 {
        self.min_ratio(WcagLevel::AA)
    }

    fn criterion(self, level: WcagLevel) -> &'static str {
        match self {
            Self::Text(_) => level.text_criterion(),
            Self::NonText => NON_TEXT_CRITERION,
        }
    }
}

/// One foreground role checked against `surface`
#[derive(Clone, Copy, Debug)]
struct ContrastCheck {
    role: &'static str,
    threshold: Threshold,
    /// Failures are reported as warnings
    advisory: bool,
    weight: f64,
}

impl ContrastCheck {
    fn new(role: ColorRole, threshold: Threshold, weight: f64) -> Self {
        Self {
            role: role.as_str(),
            threshold,
            advisory: false,
            weight,
        }
    }
}

const BACKGROUND_ROLE: &str = "surface";

/// The checks that apply to `colors`; semantic roles only when present.
fn contrast_checks(colors: &ThemeColors) -> Vec<ContrastCheck> {
    let mut checks = vec![
        ContrastCheck::new(ColorRole::Text, Threshold::Text(TextSize::Normal), 3.0),
        ContrastCheck::new(ColorRole::TextSecondary, Threshold::Text(TextSize::Normal), 2.0),
        ContrastCheck {
            advisory: true,
            ..ContrastCheck::new(ColorRole::TextMuted, Threshold::Text(TextSize::Large), 1.0)
        },
        ContrastCheck::new(ColorRole::Primary, Threshold::NonText, 2.0),
        ContrastCheck::new(ColorRole::Border, Threshold::NonText, 1.0),
    ];
    checks.extend(
        SEMANTIC_COLOR_ROLES
            .iter()
            .filter(|role| colors.contains(role.as_str()))
            .map(|&role| ContrastCheck::new(role, Threshold::NonText, 1.0)),
    );
    checks
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Verdict {
    Pass,
    Warning,
    Error,
}

impl Verdict {
    fn credit(self) -> f64 {
        match self {
            Self::Pass => 1.0,
            Self::Warning => 0.5,
            Self::Error => 0.0,
        }
    }
}

fn classify(ratio: f64, check: &ContrastCheck, level: WcagLevel) -> Verdict {
    let required = check.threshold.min_ratio(level);
    let verdict = if ratio < check.threshold.floor() {
        Verdict::Error
    } else if ratio < required + BORDERLINE_MARGIN {
        Verdict::Warning
    } else {
        Verdict::Pass
    };

    if check.advisory && verdict == Verdict::Error {
        Verdict::Warning
    } else {
        verdict
    }
}

/// Outcome of one check whose colors could both be parsed
struct Evaluated {
    check: ContrastCheck,
    foreground: Rgb,
    background: Rgb,
    ratio: f64,
    verdict: Verdict,
}

enum CheckOutcome {
    Evaluated(Evaluated),
    /// A role is missing, unresolved or unparseable
    Skipped { check: ContrastCheck, role: &'static str, reason: Skip },
}

#[derive(Clone, Debug)]
enum Skip {
    Missing,
    Unresolved,
    Unparseable(String),
}

fn concrete_color(colors: &ThemeColors, role: &'static str) -> Result<Rgb, Skip> {
    match colors.get(role) {
        None => Err(Skip::Missing),
        Some(TokenValue::Reference(_)) => Err(Skip::Unresolved),
        Some(TokenValue::Literal(literal)) => {
            parse_color(literal).map_err(|e| Skip::Unparseable(e.to_string()))
        }
    }
}

fn run_checks(colors: &ThemeColors, level: WcagLevel) -> Vec<CheckOutcome> {
    let background = concrete_color(colors, BACKGROUND_ROLE);
    contrast_checks(colors)
        .into_iter()
        .map(|check| {
            let pair = concrete_color(colors, check.role)
                .map_err(|reason| (check.role, reason))
                .and_then(|fg| {
                    background
                        .clone()
                        .map(|bg| (fg, bg))
                        .map_err(|reason| (BACKGROUND_ROLE, reason))
                });
            match pair {
                Ok((foreground, background)) => {
                    let ratio = contrast_ratio(foreground, background);
                    CheckOutcome::Evaluated(Evaluated {
                        check,
                        foreground,
                        background,
                        ratio,
                        verdict: classify(ratio, &check, level),
                    })
                }
                Err((role, reason)) => CheckOutcome::Skipped { check, role, reason },
            }
        })
        .collect()
}

fn pair_field(role: &str) -> String {
    format!("colors.{role} / colors.{BACKGROUND_ROLE}")
}

fn contrast_issue(evaluated: &Evaluated, level: WcagLevel) -> Option<AuditIssue> {
    let Evaluated {
        check,
        foreground,
        background,
        ratio,
        verdict,
    } = evaluated;
    let severity = match verdict {
        Verdict::Pass => return None,
        Verdict::Warning => IssueSeverity::Warning,
        Verdict::Error => IssueSeverity::Error,
    };

    let required = check.threshold.min_ratio(level);
    let message = if *ratio < required {
        format!(
            "`{}` on `{BACKGROUND_ROLE}` has a contrast ratio of {ratio:.2}:1, below the required {required}:1",
            check.role
        )
    } else {
        format!(
            "`{}` on `{BACKGROUND_ROLE}` has a contrast ratio of {ratio:.2}:1, only just above the required {required}:1",
            check.role
        )
    };

    let target = if *ratio < required {
        required
    } else {
        required + BORDERLINE_MARGIN
    };
    let adjustment = adjust_for_contrast_either_way(*foreground, *background, target);
    let recommendation = if adjustment.met_target {
        let direction = if adjustment.lightness_delta < 0.0 { "darken" } else { "lighten" };
        format!(
            "Increase the lightness difference: {direction} `{}` by {:.0} points to {} ({:.2}:1)",
            check.role,
            adjustment.lightness_delta.abs(),
            adjustment.color,
            adjustment.ratio
        )
    } else {
        format!(
            "No lightness of `{}` reaches {target:.1}:1 on this surface; adjust `{BACKGROUND_ROLE}` instead",
            check.role
        )
    };

    Some(AuditIssue {
        field: pair_field(check.role),
        category: IssueCategory::Contrast,
        severity,
        wcag_criterion: Some(check.threshold.criterion(level)),
        message,
        recommendation,
        ratio: Some(*ratio),
        required: Some(required),
    })
}

fn other_issue(field: String, severity: IssueSeverity, message: String, recommendation: &str) -> AuditIssue {
    AuditIssue {
        field,
        category: IssueCategory::Other,
        severity,
        wcag_criterion: None,
        message,
        recommendation: recommendation.to_string(),
        ratio: None,
        required: None,
    }
}

/// Audit a theme at the given conformance level.
pub fn audit_theme_accessibility(theme: &ThemeConfig, level: WcagLevel) -> AccessibilityAuditResult {
    let resolution = resolve_theme_tokens_lenient(theme);
    let colors = &resolution.theme.colors;
    let mut issues = Vec::new();
    // Fields already reported, so a broken role is not reported once per check
    let mut reported = FxHashSet::default();

    for error in &resolution.errors {
        if !error.field().starts_with("colors.") {
            continue;
        }
        reported.insert(error.field().to_string());
        issues.push(other_issue(
            error.field().to_string(),
            IssueSeverity::Error,
            error.to_string(),
            "Point the reference at an existing token",
        ));
    }

    for role in colors.missing_required_roles() {
        let field = format!("colors.{role}");
        reported.insert(field.clone());
        issues.push(other_issue(
            field,
            IssueSeverity::Error,
            format!("required color role `{role}` is missing"),
            "Define the role so it can be checked",
        ));
    }

    let outcomes = run_checks(colors, level);
    let total_checks = outcomes.len();
    let mut passed = 0;
    for outcome in outcomes {
        match outcome {
            CheckOutcome::Evaluated(evaluated) => match contrast_issue(&evaluated, level) {
                Some(issue) => issues.push(issue),
                None => passed += 1,
            },
            CheckOutcome::Skipped { check, role, reason } => {
                let field = format!("colors.{role}");
                if !reported.insert(field.clone()) {
                    continue;
                }
                let severity = if check.advisory {
                    IssueSeverity::Warning
                } else {
                    IssueSeverity::Error
                };
                let message = match reason {
                    Skip::Missing => format!("`{role}` is missing"),
                    Skip::Unresolved => format!("`{role}` is an unresolved reference"),
                    Skip::Unparseable(reason) => format!("`{role}` is not a concrete color: {reason}"),
                };
                issues.push(other_issue(
                    field,
                    severity,
                    message,
                    "Use a hex, RGB, HSL or named color",
                ));
            }
        }
    }

    let failed = issues.iter().filter(|i| i.severity == IssueSeverity::Error).count();
    let warnings = issues.len() - failed;
    let summary = AuditSummary {
        total_checks,
        passed,
        failed,
        warnings,
    };
    let pass_rate = if summary.total_checks == 0 {
        100.0
    } else {
        passed as f64 / summary.total_checks as f64 * 100.0
    };

    debug!(
        theme = %theme.meta.name,
        %level,
        passed = summary.passed,
        failed = summary.failed,
        warnings = summary.warnings,
        "audited theme accessibility"
    );

    AccessibilityAuditResult {
        passed: failed == 0,
        level,
        pass_rate,
        issues,
        summary,
    }
}

/// Weighted AA score in `[0, 100]`.
///
/// `text` weighs 3, `textSecondary` and `primary` 2, every other check 1.
/// A pass earns full credit, a warning half, an error or a check that
/// cannot run none.
pub fn accessibility_score(theme: &ThemeConfig) -> f64 {
    let colors = resolve_theme_tokens_lenient(theme).theme.colors;
    let (earned, total) = run_checks(&colors, WcagLevel::AA)
        .iter()
        .fold((0.0, 0.0), |(earned, total), outcome| match outcome {
            CheckOutcome::Evaluated(e) => (earned + e.check.weight * e.verdict.credit(), total + e.check.weight),
            CheckOutcome::Skipped { check, .. } => (earned, total + check.weight),
        });

    if total == 0.0 {
        0.0
    } else {
        earned / total * 100.0
    }
}

/// Quick gate on the two most critical pairs: `text` on `surface` at 4.5:1
/// and `primary` on `surface` at 3:1.
///
/// Expects resolved colors; references count as failures.
pub fn is_accessible(colors: &ThemeColors) -> bool {
    let ratio = |role| -> Option<f64> {
        Some(contrast_ratio(
            concrete_color(colors, role).ok()?,
            concrete_color(colors, BACKGROUND_ROLE).ok()?,
        ))
    };
    ratio("text").is_some_and(|r| r >= WcagLevel::AA.min_ratio(TextSize::Normal))
        && ratio("primary").is_some_and(|r| r >= UI_COMPONENT_MIN_RATIO)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemeScore {
    pub name: String,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccessibilityComparison {
    /// Highest score first
    pub rankings: Vec<ThemeScore>,
    pub best: ThemeScore,
    pub worst: ThemeScore,
    pub average: f64,
}

/// Rank themes by [`accessibility_score`]. `None` for an empty slice.
pub fn compare_accessibility(themes: &[ThemeConfig]) -> Option<AccessibilityComparison> {
    let mut rankings: Vec<ThemeScore> = themes
        .iter()
        .map(|theme| ThemeScore {
            name: theme.meta.name.clone(),
            score: accessibility_score(theme),
        })
        .collect();
    rankings.sort_by(|a, b| b.score.total_cmp(&a.score));

    let best = rankings.first()?.clone();
    let worst = rankings.last()?.clone();
    let average = rankings.iter().map(|r| r.score).sum::<f64>() / rankings.len() as f64;
    Some(AccessibilityComparison {
        rankings,
        best,
        worst,
        average,
    })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThemeAudit {
    pub name: String,
    pub result: AccessibilityAuditResult,
}

/// Audit several themes, preserving input order.
pub fn batch_audit(themes: &[ThemeConfig], level: WcagLevel) -> Vec<ThemeAudit> {
    themes
        .iter()
        .map(|theme| ThemeAudit {
            name: theme.meta.name.clone(),
            result: audit_theme_accessibility(theme, level),
        })
        .collect()
}
