//! # File Rules
//!
//! Bundlers need to know which files belong to which asset pipeline. For
//! every target this module builds one [`FileRule`] per asset category
//! (scripts, stylesheets, fonts, images and favicons) describing which
//! directories and files the category claims.
//!
//! A rule is accumulated one target at a time by a [`TargetFileRule`]: the
//! category handler produces a [`FileRuleContribution`] for the target, the
//! contribution is folded into the rule with [`append_merge`], and the result
//! is threaded through the `target-file-rule` hooks. [`TargetsFileRules`]
//! assembles the full [`TargetRules`] bundle for a target and the targets it
//! embeds.
//!
//! The SVG font, image and favicon rules never claim the same file: the
//! image rule carries the other two's patterns in its exclusion lists.

mod handlers;

pub use handlers::{Category, RuleContext};

use crate::error::Result;
use crate::events::{Events, TARGET_FILE_RULE, TARGET_FILE_RULES, TARGET_FILE_RULE_UPDATE};
use crate::path::glob_set;
use crate::targets::{Target, TargetRegistry};
use log::debug;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// A compiled regular expression that serializes as its pattern and compares
/// by pattern.
#[derive(Clone)]
pub struct Matcher(Regex);

impl Matcher {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self(Regex::new(pattern)?))
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Inclusion and exclusion regex lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatcherLists {
    pub include: Vec<Matcher>,
    pub exclude: Vec<Matcher>,
}

/// Inclusion and exclusion glob lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobLists {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// File level matchers: regexes plus the equivalent globs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileMatchers {
    pub include: Vec<Matcher>,
    pub exclude: Vec<Matcher>,
    pub glob: GlobLists,
}

/// The accumulated description of which files belong to one asset category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileRule {
    /// Extension test for the category, e.g. `\.s[ac]ss$`.
    pub extension: Option<Matcher>,
    /// Project independent glob for the category's files.
    pub glob: Option<String>,
    /// Directories the rule applies to.
    pub paths: MatcherLists,
    pub files: FileMatchers,
}

impl FileRule {
    /// Whether `path` is claimed by the regex lists: some `files.include`
    /// matches and no `files.exclude` does.
    pub fn matches(&self, path: &str) -> bool {
        self.files.include.iter().any(|m| m.is_match(path))
            && !self.files.exclude.iter().any(|m| m.is_match(path))
    }

    /// Whether `path` is claimed by the glob lists.
    pub fn matches_glob(&self, path: &str) -> Result<bool> {
        if glob_set(&self.files.glob.exclude)?.is_match(path) {
            return Ok(false);
        }
        Ok(glob_set(&self.files.glob.include)?.is_match(path))
    }
}

/// A sparse piece of a [`FileRule`] produced by a category handler. Lists
/// left empty add nothing; scalars left `None` keep the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRuleContribution {
    pub extension: Option<Matcher>,
    pub glob: Option<String>,
    pub paths: MatcherLists,
    pub files: FileMatchers,
}

/// Fold a contribution into a rule: lists are appended in order without
/// deduplication, scalars are replaced when the contribution sets them.
///
/// Unlike [`crate::config::deep_merge`] this never drops existing entries.
pub fn append_merge(mut rule: FileRule, contribution: FileRuleContribution) -> FileRule {
    if contribution.extension.is_some() {
        rule.extension = contribution.extension;
    }
    if contribution.glob.is_some() {
        rule.glob = contribution.glob;
    }
    rule.paths.include.extend(contribution.paths.include);
    rule.paths.exclude.extend(contribution.paths.exclude);
    rule.files.include.extend(contribution.files.include);
    rule.files.exclude.extend(contribution.files.exclude);
    rule.files.glob.include.extend(contribution.files.glob.include);
    rule.files.glob.exclude.extend(contribution.files.glob.exclude);
    rule
}

/// Computes a target's contribution to a rule from
/// `(target, has prior target, current rule)`.
pub type RuleHandler = Box<dyn Fn(&Target, bool, &FileRule) -> Result<FileRuleContribution>>;

/// A single category rule accumulated across one or more targets.
pub struct TargetFileRule {
    events: Rc<Events>,
    handler: RuleHandler,
    rule: FileRule,
    targets: Vec<String>,
}

impl TargetFileRule {
    pub fn new(events: Rc<Events>, handler: RuleHandler) -> Self {
        Self {
            events,
            handler,
            rule: FileRule::default(),
            targets: Vec::new(),
        }
    }

    /// Extend the rule with `target`'s contribution.
    ///
    /// The merged rule goes through `target-file-rule` (and, from the second
    /// target on, `target-file-rule-update`); the hook output becomes the new
    /// rule.
    pub fn add_target(&mut self, target: &Target) -> Result<()> {
        let has_target = self.has_target();
        let contribution = (self.handler)(target, has_target, &self.rule)?;
        let merged = append_merge(std::mem::take(&mut self.rule), contribution);

        let hooks: &[&str] = if has_target {
            &[TARGET_FILE_RULE, TARGET_FILE_RULE_UPDATE]
        } else {
            &[TARGET_FILE_RULE]
        };
        self.rule = self.events.file_rules.reduce(hooks, merged, target);
        self.targets.push(target.name.clone());
        Ok(())
    }

    pub fn has_target(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Names of the targets added so far, in order.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn rule(&self) -> &FileRule {
        &self.rule
    }

    pub fn into_rule(self) -> FileRule {
        self.rule
    }
}

/// Font rules, split by format.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontRules {
    pub common: FileRule,
    pub svg: FileRule,
}

/// Every category rule for one target.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetRules {
    pub js: FileRule,
    pub scss: FileRule,
    pub css: FileRule,
    pub fonts: FontRules,
    pub images: FileRule,
    pub favicon: FileRule,
}

impl TargetRules {
    pub fn get(&self, category: Category) -> &FileRule {
        match category {
            Category::Js => &self.js,
            Category::Scss => &self.scss,
            Category::Css => &self.css,
            Category::CommonFonts => &self.fonts.common,
            Category::SvgFonts => &self.fonts.svg,
            Category::Images => &self.images,
            Category::Favicon => &self.favicon,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut FileRule {
        match category {
            Category::Js => &mut self.js,
            Category::Scss => &mut self.scss,
            Category::Css => &mut self.css,
            Category::CommonFonts => &mut self.fonts.common,
            Category::SvgFonts => &mut self.fonts.svg,
            Category::Images => &mut self.images,
            Category::Favicon => &mut self.favicon,
        }
    }

    /// Categories whose regex lists claim `path`.
    pub fn categories_for(&self, path: &str) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.get(*category).matches(path))
            .collect()
    }
}

/// A target given either by name or as a resolved record.
#[derive(Debug, Clone, Copy)]
pub enum TargetRef<'a> {
    Name(&'a str),
    Target(&'a Target),
}

impl<'a> From<&'a str> for TargetRef<'a> {
    fn from(name: &'a str) -> Self {
        TargetRef::Name(name)
    }
}

impl<'a> From<&'a String> for TargetRef<'a> {
    fn from(name: &'a String) -> Self {
        TargetRef::Name(name)
    }
}

impl<'a> From<&'a Target> for TargetRef<'a> {
    fn from(target: &'a Target) -> Self {
        TargetRef::Target(target)
    }
}

/// Builds rule bundles for the targets of a registry.
pub struct TargetsFileRules<'a> {
    registry: &'a TargetRegistry,
}

impl<'a> TargetsFileRules<'a> {
    pub fn new(registry: &'a TargetRegistry) -> Self {
        Self { registry }
    }

    fn context(&self) -> Result<RuleContext> {
        let locations = self.registry.locations();
        Ok(RuleContext::new(
            locations.root(),
            &locations.join_from("config", "")?,
        ))
    }

    /// Build every category rule for `target`, adding the target itself and
    /// then each target it lists in `includeTargets`.
    pub fn get_rules_for_target<'t, T>(&self, target: T) -> Result<TargetRules>
    where
        T: Into<TargetRef<'t>>,
    {
        let target = match target.into() {
            TargetRef::Name(name) => self.registry.get_target(name)?,
            TargetRef::Target(target) => target,
        };

        let mut members = vec![target];
        for included in &target.include_targets {
            members.push(self.registry.get_target(included)?);
        }
        debug!(
            "Building file rules for '{}' from {} target(s)",
            target.name,
            members.len()
        );

        let context = self.context()?;
        let events = self.registry.events();
        let mut rules = TargetRules::default();
        for category in Category::ALL {
            let mut rule = TargetFileRule::new(events.clone(), category.handler(&context));
            for member in &members {
                rule.add_target(member)?;
            }
            let rule = rule.into_rule();
            events.rule_listeners.emit(category.hook_name(), &rule, target);
            *rules.get_mut(category) = rule;
        }

        events.bundle_listeners.emit(TARGET_FILE_RULES, &rules, target);
        Ok(rules)
    }
}
