use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;

use super::super::{
    args::RenderCommand,
    context::CommandContext,
    exit_status::ExitStatus,
    report::{SUCCESS_MARK, WARNING_MARK},
};
use crate::{
    core::{ApplyReport, Dictionary, Locale, MarkerAttributes, TranslationTarget, apply_all},
    markup::{HtmlDocument, scan_templates},
};

struct RenderedTemplate {
    path: PathBuf,
    html: String,
    report: ApplyReport,
}

pub fn render(ctx: &CommandContext, cmd: &RenderCommand) -> Result<ExitStatus> {
    let locales = requested_locales(&cmd.locales);

    let scan = scan_templates(&ctx.root, &ctx.config.includes, &ctx.config.ignores);
    if scan.skipped_count > 0 {
        log::warn!(
            "{} path(s) skipped due to access errors{}",
            scan.skipped_count,
            if ctx.verbose { "" } else { " (use -v for details)" }
        );
    }
    if scan.files.is_empty() {
        println!("No templates found under: {}", ctx.config.includes.join(", "));
        return Ok(ExitStatus::Success);
    }

    let markers = ctx.config.markers();
    let output_root = ctx.config.output_root(&ctx.root);
    let files: Vec<&PathBuf> = scan.files.iter().collect();
    let mut any_untranslated = false;
    let mut written = 0;

    for locale in locales {
        let dictionary = ctx.load_dictionary(locale)?;

        let rendered = files
            .par_iter()
            .map(|path| render_template(path, locale, &dictionary, &markers))
            .collect::<Result<Vec<_>>>()?;

        let applied: usize = rendered.iter().map(|r| r.report.applied()).sum();
        let untranslated: BTreeSet<&str> = rendered
            .iter()
            .flat_map(|r| r.report.untranslated.iter().map(String::as_str))
            .collect();

        if cmd.apply {
            for template in &rendered {
                let dest = destination(&output_root, locale, &ctx.root, &template.path);
                write_template(&dest, &template.html)?;
                written += 1;
            }
        }

        println!(
            "{} {}: {} template(s), {} node(s) translated",
            SUCCESS_MARK.green(),
            locale.code().bold(),
            rendered.len(),
            applied
        );
        if !untranslated.is_empty() {
            any_untranslated = true;
            println!(
                "{} {}: {} untranslated key(s): {}",
                WARNING_MARK.yellow(),
                locale.code().bold(),
                untranslated.len(),
                untranslated.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
    }

    println!();
    if cmd.apply {
        println!("Wrote {} file(s) to {}", written, output_root.display());
    } else {
        println!(
            "Dry run: use --apply to write files to {}",
            output_root.display()
        );
    }

    Ok(if any_untranslated {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

/// Locales in the order given, each once; all of them when none are given.
fn requested_locales(requested: &[Locale]) -> Vec<Locale> {
    if requested.is_empty() {
        return Locale::ALL.to_vec();
    }
    let mut locales = Vec::new();
    for locale in requested {
        if !locales.contains(locale) {
            locales.push(*locale);
        }
    }
    locales
}

fn render_template(
    path: &Path,
    locale: Locale,
    dictionary: &Dictionary,
    markers: &MarkerAttributes,
) -> Result<RenderedTemplate> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template: {}", path.display()))?;

    let mut doc = HtmlDocument::parse(source);
    doc.set_lang(locale);
    let report = apply_all(&mut doc, dictionary, markers);
    log::debug!(
        "{}: {} applied, {} untranslated",
        path.display(),
        report.applied(),
        report.untranslated.len()
    );

    Ok(RenderedTemplate {
        path: path.to_path_buf(),
        html: doc.to_html(),
        report,
    })
}

/// `{output_root}/{locale}/{path relative to root}`
fn destination(output_root: &Path, locale: Locale, root: &Path, template: &Path) -> PathBuf {
    let relative = template.strip_prefix(root).unwrap_or(template);
    output_root.join(locale.code()).join(relative)
}

fn write_template(dest: &Path, html: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(dest, html).with_context(|| format!("Failed to write file: {}", dest.display()))
}
