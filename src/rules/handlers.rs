//! Per-category contributions.
//!
//! Every handler claims the category's files under the target's source
//! directory plus a category specific slice of `node_modules`. Regexes and
//! globs are built from the same absolute, slash separated paths.

use super::{FileRule, FileRuleContribution, Matcher, RuleHandler};
use crate::error::Result;
use crate::events::{
    TARGET_COMMON_FONT_FILES_RULE, TARGET_CSS_FILES_RULE, TARGET_FAVICON_FILES_RULE,
    TARGET_IMAGE_FILES_RULE, TARGET_JS_FILES_RULE, TARGET_SCSS_FILES_RULE,
    TARGET_SVG_FONT_FILES_RULE,
};
use crate::path::to_slash;
use crate::targets::Target;
use globset::escape as escape_glob;
use regex::escape;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Project wide paths the handlers need besides the target itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContext {
    root: String,
    config: String,
}

impl RuleContext {
    pub fn new(root: &Path, config: &Path) -> Self {
        Self {
            root: to_slash(root),
            config: to_slash(config),
        }
    }
}

/// Asset categories, in bundle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Js,
    Scss,
    Css,
    CommonFonts,
    SvgFonts,
    Images,
    Favicon,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Js,
        Category::Scss,
        Category::Css,
        Category::CommonFonts,
        Category::SvgFonts,
        Category::Images,
        Category::Favicon,
    ];

    /// Key of the category in a serialized bundle.
    pub fn name(self) -> &'static str {
        match self {
            Category::Js => "js",
            Category::Scss => "scss",
            Category::Css => "css",
            Category::CommonFonts => "fonts.common",
            Category::SvgFonts => "fonts.svg",
            Category::Images => "images",
            Category::Favicon => "favicon",
        }
    }

    /// Informational hook emitted once the category rule is complete.
    pub fn hook_name(self) -> &'static str {
        match self {
            Category::Js => TARGET_JS_FILES_RULE,
            Category::Scss => TARGET_SCSS_FILES_RULE,
            Category::Css => TARGET_CSS_FILES_RULE,
            Category::CommonFonts => TARGET_COMMON_FONT_FILES_RULE,
            Category::SvgFonts => TARGET_SVG_FONT_FILES_RULE,
            Category::Images => TARGET_IMAGE_FILES_RULE,
            Category::Favicon => TARGET_FAVICON_FILES_RULE,
        }
    }

    /// The rule handler of the category, bound to `context`.
    pub fn handler(self, context: &RuleContext) -> RuleHandler {
        let contribute: fn(&RuleContext, &Target, bool) -> Result<FileRuleContribution> =
            match self {
                Category::Js => js,
                Category::Scss => scss,
                Category::Css => css,
                Category::CommonFonts => common_fonts,
                Category::SvgFonts => svg_fonts,
                Category::Images => images,
                Category::Favicon => favicon,
            };
        let context = context.clone();
        Box::new(move |target: &Target, has_prior: bool, _: &FileRule| {
            contribute(&context, target, has_prior)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const JS_EXT: (&str, &str) = (r"[jt]sx?", "{js,jsx,ts,tsx}");
const SCSS_EXT: (&str, &str) = ("scss", "scss");
const CSS_EXT: (&str, &str) = ("css", "css");
const FONT_EXT: (&str, &str) = (r"(?:woff2?|ttf|eot)", "{woff,woff2,ttf,eot}");
const IMAGE_EXT: (&str, &str) = (r"(?:jpe?g|png|gif|svg)", "{jpg,jpeg,png,gif,svg}");

/// Regexes and globs for one category, built up entry by entry.
struct Builder {
    contribution: FileRuleContribution,
}

impl Builder {
    fn new(ext: (&str, &str)) -> Result<Self> {
        Self::named(&format!(r"\.{}$", ext.0), &format!("**/*.{}", ext.1))
    }

    fn named(extension: &str, glob: &str) -> Result<Self> {
        Ok(Self {
            contribution: FileRuleContribution {
                extension: Some(Matcher::new(extension)?),
                glob: Some(glob.to_string()),
                ..FileRuleContribution::default()
            },
        })
    }

    /// Claim a directory: its path regex, file regex and glob.
    fn include(&mut self, path: String, file: String, glob: String) -> Result<&mut Self> {
        let c = &mut self.contribution;
        c.paths.include.push(Matcher::new(&path)?);
        c.files.include.push(Matcher::new(&file)?);
        c.files.glob.include.push(glob);
        Ok(self)
    }

    fn exclude(&mut self, file: String, glob: String) -> Result<&mut Self> {
        let c = &mut self.contribution;
        c.paths.exclude.push(Matcher::new(&file)?);
        c.files.exclude.push(Matcher::new(&file)?);
        c.files.glob.exclude.push(glob);
        Ok(self)
    }

    /// Claim the category's files under `dir`.
    fn directory(&mut self, dir: &str, ext: (&str, &str)) -> Result<&mut Self> {
        self.include(
            format!("^{}/", escape(dir)),
            format!(r"^{}/.+\.{}$", escape(dir), ext.0),
            format!("{}/**/*.{}", escape_glob(dir), ext.1),
        )
    }

    /// Claim the category's files in one npm package, wherever it is installed.
    fn module(&mut self, root: &str, module: &str, ext: (&str, &str)) -> Result<&mut Self> {
        self.include(
            format!("/node_modules/{}/", escape(module)),
            format!(r"/node_modules/{}/.+\.{}$", escape(module), ext.0),
            format!(
                "{}/node_modules/{}/**/*.{}",
                escape_glob(root),
                escape_glob(module),
                ext.1
            ),
        )
    }

    /// Claim the category's files in every npm package.
    fn node_modules(&mut self, root: &str, ext: (&str, &str)) -> Result<&mut Self> {
        self.include(
            "/node_modules/".to_string(),
            format!(r"/node_modules/.+\.{}$", ext.0),
            format!("{}/node_modules/**/*.{}", escape_glob(root), ext.1),
        )
    }

    fn build(self) -> FileRuleContribution {
        self.contribution
    }
}

fn source(target: &Target) -> String {
    to_slash(&target.paths.source)
}

/// SVG files below a `fonts` directory in the target and in `node_modules`.
fn svg_font_patterns(root: &str, src: &str) -> [(String, String); 2] {
    [
        (
            format!(r"^{}/(?:.+/)?fonts/(?:.+/)?[^/]+\.svg$", escape(src)),
            format!("{}/**/fonts/**/*.svg", escape_glob(src)),
        ),
        (
            r"/node_modules/(?:.+/)?fonts/(?:.+/)?[^/]+\.svg$".to_string(),
            format!("{}/node_modules/**/fonts/**/*.svg", escape_glob(root)),
        ),
    ]
}

fn favicon_pattern(src: &str) -> (String, String) {
    (
        format!(r"^{}/(?:.+/)?favicon\.(?:png|ico)$", escape(src)),
        format!("{}/**/favicon.{{png,ico}}", escape_glob(src)),
    )
}

fn js(ctx: &RuleContext, target: &Target, has_prior: bool) -> Result<FileRuleContribution> {
    let mut rule = Builder::new(JS_EXT)?;
    rule.directory(&source(target), JS_EXT)?;
    for module in &target.include_modules {
        rule.module(&ctx.root, module, JS_EXT)?;
    }
    if !has_prior {
        rule.directory(&ctx.config, JS_EXT)?;
    }
    Ok(rule.build())
}

fn scss(ctx: &RuleContext, target: &Target, _: bool) -> Result<FileRuleContribution> {
    let mut rule = Builder::new(SCSS_EXT)?;
    rule.directory(&source(target), SCSS_EXT)?;
    for module in &target.include_modules {
        rule.module(&ctx.root, module, SCSS_EXT)?;
    }
    Ok(rule.build())
}

fn css(ctx: &RuleContext, target: &Target, _: bool) -> Result<FileRuleContribution> {
    let mut rule = Builder::new(CSS_EXT)?;
    rule.directory(&source(target), CSS_EXT)?
        .node_modules(&ctx.root, CSS_EXT)?;
    Ok(rule.build())
}

fn common_fonts(ctx: &RuleContext, target: &Target, _: bool) -> Result<FileRuleContribution> {
    let mut rule = Builder::new(FONT_EXT)?;
    rule.directory(&source(target), FONT_EXT)?
        .node_modules(&ctx.root, FONT_EXT)?;
    Ok(rule.build())
}

fn svg_fonts(ctx: &RuleContext, target: &Target, _: bool) -> Result<FileRuleContribution> {
    let src = source(target);
    let mut rule = Builder::named(r"\.svg$", "**/fonts/**/*.svg")?;
    let [own, modules] = svg_font_patterns(&ctx.root, &src);
    rule.include(format!("^{}/", escape(&src)), own.0, own.1)?
        .include("/node_modules/".to_string(), modules.0, modules.1)?;
    Ok(rule.build())
}

fn images(ctx: &RuleContext, target: &Target, _: bool) -> Result<FileRuleContribution> {
    let src = source(target);
    let mut rule = Builder::new(IMAGE_EXT)?;
    rule.directory(&src, IMAGE_EXT)?
        .node_modules(&ctx.root, IMAGE_EXT)?;

    for (file, glob) in svg_font_patterns(&ctx.root, &src) {
        rule.exclude(file, glob)?;
    }
    let (file, glob) = favicon_pattern(&src);
    rule.exclude(file, glob)?;
    rule.exclude(
        r"/node_modules/(?:.+/)?favicon\.(?:png|ico)$".to_string(),
        format!("{}/node_modules/**/favicon.{{png,ico}}", escape_glob(&ctx.root)),
    )?;
    Ok(rule.build())
}

fn favicon(_: &RuleContext, target: &Target, _: bool) -> Result<FileRuleContribution> {
    let src = source(target);
    let mut rule = Builder::named(r"favicon\.(?:png|ico)$", "**/favicon.{png,ico}")?;
    let (file, glob) = favicon_pattern(&src);
    rule.include(format!("^{}/", escape(&src)), file, glob)?;
    Ok(rule.build())
}
