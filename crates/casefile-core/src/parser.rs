//! TOML case-file parser.
//!
//! Loads case files from TOML files and directories, checks them for
//! structural errors, and reports softer validation warnings.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CaseError;
use crate::model::{
    CaseFile, Messages, MultiSuspectRule, Objective, ObjectiveMode, ObjectiveRule, RosterEntry,
    SingleSuspectRule, Suspect,
};
use crate::normalize::normalize;

/// Most targets a multi-suspect objective may have; every partial
/// combination needs its own hint.
pub const MAX_TARGETS: usize = 12;

/// Intermediate TOML structure for parsing case files.
#[derive(Debug, Deserialize)]
struct TomlCaseFile {
    case: TomlCaseHeader,
    #[serde(default)]
    suspects: Vec<TomlSuspect>,
    #[serde(default)]
    objectives: Vec<TomlObjective>,
}

#[derive(Debug, Deserialize)]
struct TomlCaseHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    messages: TomlMessages,
}

#[derive(Debug, Default, Deserialize)]
struct TomlMessages {
    #[serde(default)]
    no_objective: Option<String>,
    #[serde(default)]
    unknown_objective: Option<String>,
    #[serde(default)]
    multiple_names: Option<String>,
    #[serde(default)]
    incorrect: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlSuspect {
    id: String,
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TomlObjective {
    id: String,
    #[serde(default)]
    label: String,
    mode: String,
    // multi_suspect
    #[serde(default)]
    targets: Vec<String>,
    #[serde(default)]
    decoys: Vec<String>,
    #[serde(default)]
    success: Option<String>,
    #[serde(default)]
    decoy_message: Option<String>,
    #[serde(default)]
    hints: Vec<TomlHint>,
    // single_suspect
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    roster: Vec<TomlRosterEntry>,
    // reveal_only
    #[serde(default)]
    reveal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlHint {
    suspects: Vec<String>,
    message: String,
}

#[derive(Debug, Deserialize)]
struct TomlRosterEntry {
    suspect: String,
    message: String,
}

/// Parse a single TOML file into a `CaseFile`.
pub fn parse_case_file(path: &Path) -> Result<CaseFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read case file: {}", path.display()))?;

    parse_case_str(&content, path)
}

/// Parse a TOML string into a `CaseFile` (useful for testing).
pub fn parse_case_str(content: &str, source_path: &Path) -> Result<CaseFile> {
    let parsed: TomlCaseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    build_case(parsed).with_context(|| format!("invalid case file: {}", source_path.display()))
}

/// Recursively load all `.toml` case files from a directory.
pub fn load_case_directory(dir: &Path) -> Result<Vec<CaseFile>> {
    let mut cases = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            cases.extend(load_case_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_case_file(&path) {
                Ok(case) => cases.push(case),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(cases)
}

fn build_case(parsed: TomlCaseFile) -> Result<CaseFile, CaseError> {
    let suspects = build_suspects(parsed.suspects)?;

    let mut seen_ids = HashSet::new();
    let mut objectives = Vec::with_capacity(parsed.objectives.len());
    for raw in parsed.objectives {
        if !seen_ids.insert(raw.id.clone()) {
            return Err(CaseError::DuplicateObjective(raw.id));
        }
        objectives.push(build_objective(raw, &suspects)?);
    }

    let defaults = Messages::default();
    let overrides = parsed.case.messages;
    let messages = Messages {
        no_objective: overrides.no_objective.unwrap_or(defaults.no_objective),
        unknown_objective: overrides
            .unknown_objective
            .unwrap_or(defaults.unknown_objective),
        multiple_names: overrides.multiple_names.unwrap_or(defaults.multiple_names),
        incorrect: overrides.incorrect.unwrap_or(defaults.incorrect),
    };

    Ok(CaseFile {
        id: parsed.case.id,
        title: parsed.case.title,
        description: parsed.case.description,
        messages,
        suspects,
        objectives,
    })
}

fn build_suspects(raw: Vec<TomlSuspect>) -> Result<Vec<Suspect>, CaseError> {
    let mut seen_ids = HashSet::new();
    let mut alias_owners: HashMap<String, String> = HashMap::new();
    let mut suspects = Vec::with_capacity(raw.len());

    for s in raw {
        if !seen_ids.insert(s.id.clone()) {
            return Err(CaseError::DuplicateSuspect(s.id));
        }

        let mut aliases: Vec<String> = Vec::with_capacity(s.aliases.len());
        for raw_alias in &s.aliases {
            let alias = normalize(raw_alias);
            if alias.is_empty() {
                return Err(CaseError::EmptyAlias { suspect: s.id });
            }
            if aliases.contains(&alias) {
                return Err(CaseError::RepeatedAlias {
                    suspect: s.id,
                    alias,
                });
            }
            if let Some(owner) = alias_owners.get(&alias) {
                return Err(CaseError::SharedAlias {
                    alias,
                    first: owner.clone(),
                    second: s.id,
                });
            }
            alias_owners.insert(alias.clone(), s.id.clone());
            aliases.push(alias);
        }

        suspects.push(Suspect {
            id: s.id,
            name: s.name,
            aliases,
        });
    }

    Ok(suspects)
}

/// Look up each id, rejecting unknown and repeated suspects.
fn resolve_suspects(
    objective: &str,
    ids: &[String],
    suspects: &[Suspect],
) -> Result<Vec<Suspect>, CaseError> {
    let mut seen = HashSet::new();
    ids.iter()
        .map(|id| {
            if !seen.insert(id.as_str()) {
                return Err(CaseError::RepeatedSuspect {
                    objective: objective.to_string(),
                    suspect: id.clone(),
                });
            }
            suspects
                .iter()
                .find(|s| &s.id == id)
                .cloned()
                .ok_or_else(|| CaseError::UnknownSuspect {
                    objective: objective.to_string(),
                    suspect: id.clone(),
                })
        })
        .collect()
}

fn required(
    objective: &str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, CaseError> {
    value.ok_or_else(|| CaseError::MissingField {
        objective: objective.to_string(),
        field,
    })
}

fn build_objective(raw: TomlObjective, suspects: &[Suspect]) -> Result<Objective, CaseError> {
    let mode: ObjectiveMode = raw
        .mode
        .parse()
        .map_err(|message| CaseError::UnknownMode {
            objective: raw.id.clone(),
            message,
        })?;

    let rule = match mode {
        ObjectiveMode::MultiSuspect => ObjectiveRule::MultiSuspect(build_multi_suspect(
            &raw.id,
            raw.targets,
            raw.decoys,
            raw.success,
            raw.decoy_message,
            raw.hints,
            suspects,
        )?),
        ObjectiveMode::SingleSuspect => ObjectiveRule::SingleSuspect(build_single_suspect(
            &raw.id,
            raw.target,
            raw.roster,
            suspects,
        )?),
        ObjectiveMode::RevealOnly => ObjectiveRule::RevealOnly {
            reveal: required(&raw.id, "reveal", raw.reveal)?,
        },
    };

    Ok(Objective {
        id: raw.id,
        label: raw.label,
        rule,
    })
}

#[allow(clippy::too_many_arguments)]
fn build_multi_suspect(
    objective: &str,
    target_ids: Vec<String>,
    decoy_ids: Vec<String>,
    success: Option<String>,
    decoy_message: Option<String>,
    raw_hints: Vec<TomlHint>,
    suspects: &[Suspect],
) -> Result<MultiSuspectRule, CaseError> {
    if target_ids.is_empty() {
        return Err(CaseError::MissingField {
            objective: objective.to_string(),
            field: "targets",
        });
    }
    if target_ids.len() > MAX_TARGETS {
        return Err(CaseError::TooManyTargets {
            objective: objective.to_string(),
            count: target_ids.len(),
            limit: MAX_TARGETS,
        });
    }

    let success = required(objective, "success", success)?;
    let decoy_message = required(objective, "decoy_message", decoy_message)?;
    let targets = resolve_suspects(objective, &target_ids, suspects)?;
    let decoys = resolve_suspects(objective, &decoy_ids, suspects)?;

    if let Some(both) = decoys.iter().find(|d| target_ids.contains(&d.id)) {
        return Err(CaseError::RepeatedSuspect {
            objective: objective.to_string(),
            suspect: both.id.clone(),
        });
    }

    let invalid = |reason: String| CaseError::InvalidHint {
        objective: objective.to_string(),
        reason,
    };

    let mut hints = BTreeMap::new();
    for hint in raw_hints {
        let named: BTreeSet<String> = hint.suspects.iter().cloned().collect();
        if named.is_empty() {
            return Err(invalid("names no suspects".into()));
        }
        if named.len() != hint.suspects.len() {
            return Err(invalid("repeats a suspect".into()));
        }
        if let Some(stranger) = named.iter().find(|id| !target_ids.contains(id)) {
            return Err(invalid(format!("'{stranger}' is not a target")));
        }
        if named.len() == target_ids.len() {
            return Err(invalid("names every target; use `success` instead".into()));
        }
        let key = named.iter().cloned().collect::<Vec<_>>().join(", ");
        if hints.insert(named, hint.message).is_some() {
            return Err(invalid(format!("more than one hint for {key}")));
        }
    }

    // Every non-empty proper subset of the targets needs a hint.
    let full = (1u32 << target_ids.len()) - 1;
    for mask in 1..full {
        let subset: BTreeSet<String> = target_ids
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, id)| id.clone())
            .collect();
        if !hints.contains_key(&subset) {
            return Err(CaseError::MissingHint {
                objective: objective.to_string(),
                suspects: subset.into_iter().collect::<Vec<_>>().join(", "),
            });
        }
    }

    Ok(MultiSuspectRule {
        targets,
        decoys,
        success,
        decoy_message,
        hints,
    })
}

fn build_single_suspect(
    objective: &str,
    target: Option<String>,
    raw_roster: Vec<TomlRosterEntry>,
    suspects: &[Suspect],
) -> Result<SingleSuspectRule, CaseError> {
    let target = required(objective, "target", target)?;
    if raw_roster.is_empty() {
        return Err(CaseError::MissingField {
            objective: objective.to_string(),
            field: "roster",
        });
    }

    let ids: Vec<String> = raw_roster.iter().map(|e| e.suspect.clone()).collect();
    let resolved = resolve_suspects(objective, &ids, suspects)?;

    if !ids.contains(&target) {
        return Err(CaseError::TargetNotOnRoster {
            objective: objective.to_string(),
            target,
        });
    }

    let roster = resolved
        .into_iter()
        .zip(raw_roster)
        .map(|(suspect, entry)| RosterEntry {
            suspect,
            message: entry.message,
        })
        .collect();

    Ok(SingleSuspectRule { target, roster })
}

/// A warning from case-file validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The objective ID (if applicable).
    pub objective_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn case(message: impl Into<String>) -> Self {
        Self {
            objective_id: None,
            message: message.into(),
        }
    }

    fn objective(id: &str, message: impl Into<String>) -> Self {
        Self {
            objective_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a case file for issues that do not stop it from loading.
pub fn validate_case(case: &CaseFile) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if case.objectives.is_empty() {
        warnings.push(ValidationWarning::case("case has no objectives"));
    }

    // Suspects nobody can name, or nobody is asked about
    for suspect in &case.suspects {
        if suspect.aliases.is_empty() {
            warnings.push(ValidationWarning::case(format!(
                "suspect {} has no aliases and can never be named",
                suspect.id
            )));
        }
        let referenced = case.objectives.iter().any(|o| match &o.rule {
            ObjectiveRule::MultiSuspect(rule) => rule
                .targets
                .iter()
                .chain(&rule.decoys)
                .any(|s| s.id == suspect.id),
            ObjectiveRule::SingleSuspect(rule) => {
                rule.roster.iter().any(|e| e.suspect.id == suspect.id)
            }
            ObjectiveRule::RevealOnly { .. } => false,
        });
        if !referenced {
            warnings.push(ValidationWarning::case(format!(
                "suspect {} is not used by any objective",
                suspect.id
            )));
        }
    }

    for objective in &case.objectives {
        if objective.label.trim().is_empty() {
            warnings.push(ValidationWarning::objective(&objective.id, "label is empty"));
        }

        match &objective.rule {
            ObjectiveRule::MultiSuspect(rule) => {
                if rule.success.trim().is_empty() {
                    warnings.push(ValidationWarning::objective(
                        &objective.id,
                        "success message is empty",
                    ));
                }
                if rule.decoys.is_empty() {
                    warnings.push(ValidationWarning::objective(
                        &objective.id,
                        "no decoys; any mix of targets only earns hints",
                    ));
                }
            }
            ObjectiveRule::SingleSuspect(rule) => {
                for entry in rule.roster.iter().filter(|e| e.message.trim().is_empty()) {
                    warnings.push(ValidationWarning::objective(
                        &objective.id,
                        format!("roster message for {} is empty", entry.suspect.id),
                    ));
                }
                // Answers with a comma are always read as a list here.
                for entry in &rule.roster {
                    for alias in entry.suspect.aliases.iter().filter(|a| a.contains(',')) {
                        warnings.push(ValidationWarning::objective(
                            &objective.id,
                            format!(
                                "alias '{alias}' of {} contains a comma and can never be named",
                                entry.suspect.id
                            ),
                        ));
                    }
                }
            }
            ObjectiveRule::RevealOnly { reveal } => {
                if reveal.trim().is_empty() {
                    warnings.push(ValidationWarning::objective(
                        &objective.id,
                        "reveal text is empty",
                    ));
                }
            }
        }
    }

    warnings
}
