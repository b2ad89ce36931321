//! Handler functions for project CLI commands.
//!
//! These functions implement `parse`, `list`, `show`, `preview`, and
//! `validate`. Each builds what it needs from a loaded [`FolioConfig`].

use crate::config::{FolioConfig, PROJECTS};
use folio_content::frontmatter::split_frontmatter;
use folio_content::markdown::render_html;
use folio_content::{
    Catalog, ParsedContent, Project, ProjectLoader, ProjectPreview, ValidationIssue,
    validate_catalog,
};
use folio_core::traits::ConfigProvider;
use folio_core::util::files::read_file;
use folio_core::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Helper: build the catalog
// ============================================================================

/// Build a catalog over the configured projects directory.
pub async fn build_catalog(config: &FolioConfig) -> Result<Catalog> {
    let dir = config.content_path(PROJECTS)?;
    let metadata = Arc::new(config.metadata_table().await?);
    log::debug!("projects directory: {}", dir.display());

    let loader =
        ProjectLoader::new(dir, metadata).with_extensions(config.content.extensions.clone());
    Ok(Catalog::new(loader, config.extractor()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::serialization(e.to_string()))?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// Extract display fields from one file, outside any catalog.
pub async fn handle_parse(config: &FolioConfig, file: &Path, json: bool) -> Result<()> {
    let text = read_file(file).await?;
    let (_, body) = split_frontmatter(&text);
    let parsed = config.extractor().parse(body);

    if json {
        print_json(&parsed)
    } else {
        print!("{}", format_parsed(&parsed));
        Ok(())
    }
}

/// List all projects, newest first.
pub async fn handle_list(config: &FolioConfig, json: bool) -> Result<()> {
    let catalog = build_catalog(config).await?;
    let projects = catalog.projects().await;

    if json {
        return print_json(&projects);
    }

    if projects.is_empty() {
        println!(
            "No projects found in {}",
            catalog.loader().dir().display()
        );
        return Ok(());
    }

    for project in &projects {
        println!("{}", format_list_line(project));
    }
    println!("\n{} project(s)", projects.len());
    Ok(())
}

/// Show one project.
pub async fn handle_show(config: &FolioConfig, slug: &str, json: bool, html: bool) -> Result<()> {
    let catalog = build_catalog(config).await?;
    let project = catalog
        .project(slug)
        .await
        .ok_or_else(|| Error::not_found(format!("project '{slug}'")))?;

    if json {
        return print_json(&project);
    }

    if html {
        println!("<h2>The Problem</h2>\n{}", render_html(&project.problem));
        println!("<h2>The Solution</h2>\n{}", render_html(&project.solution));
        return Ok(());
    }

    print!("{}", format_project(&project));
    Ok(())
}

/// Show preview card data for one project.
pub async fn handle_preview(config: &FolioConfig, slug: &str) -> Result<()> {
    let catalog = build_catalog(config).await?;
    let preview = catalog
        .preview(slug)
        .await
        .ok_or_else(|| Error::not_found(format!("preview for '{slug}'")))?;

    print!("{}", format_preview(&preview));
    Ok(())
}

/// Validate every project. Fails when any error-level issue is found.
pub async fn handle_validate(config: &FolioConfig, json: bool) -> Result<()> {
    let catalog = build_catalog(config).await?;
    let projects = catalog.loader().try_load_all().await?;
    let result = validate_catalog(&projects, catalog.extractor(), catalog.metadata());

    if json {
        print_json(&result)?;
    } else {
        if result.valid {
            println!("{} project(s) are valid.", projects.len());
        } else {
            println!("Projects have validation issues:");
        }
        for error in &result.errors {
            println!("{}", format_issue("ERROR", error));
        }
        for warning in &result.warnings {
            println!("{}", format_issue("WARN ", warning));
        }
        println!(
            "\nSummary: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }

    if result.valid {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "{} validation error(s)",
            result.errors.len()
        )))
    }
}

// ============================================================================
// Text formatting
// ============================================================================

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(out, "{heading}:");
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

fn push_block(out: &mut String, heading: &str, text: &str) {
    let _ = writeln!(out, "{heading}:");
    if text.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for line in text.lines() {
        let _ = writeln!(out, "  {line}");
    }
}

fn format_parsed(parsed: &ParsedContent) -> String {
    let mut out = String::new();
    push_block(&mut out, "Problem", &parsed.problem);
    push_block(&mut out, "Solution", &parsed.solution);
    push_list(&mut out, "Features", &parsed.features);
    push_list(&mut out, "Impact", &parsed.impact);
    push_list(&mut out, "Tech stack", &parsed.tech_stack);
    out
}

fn format_list_line(project: &Project) -> String {
    let date = if project.date.is_empty() {
        "-"
    } else {
        project.date.as_str()
    };
    format!("{:<24} {:<10} {}", project.slug, date, project.title)
}

fn format_project(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.title);
    let _ = writeln!(out, "{}", project.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Slug:  {}", project.slug);
    let _ = writeln!(out, "Date:  {}", project.date);
    let _ = writeln!(out, "Color: {}", project.color);
    if let Some(link) = &project.link {
        let _ = writeln!(out, "Link:  {link}");
    }
    if let Some(image) = &project.image {
        let _ = writeln!(out, "Image: {image}");
    }
    let _ = writeln!(out);
    push_block(&mut out, "Problem", &project.problem);
    push_block(&mut out, "Solution", &project.solution);
    push_list(&mut out, "Features", &project.features);
    push_list(&mut out, "Impact", &project.impact);
    push_list(&mut out, "Tech stack", &project.tech_stack);
    out
}

fn format_preview(preview: &ProjectPreview) -> String {
    format!(
        "{} ({})\n{}\nColor: {}\nTech:  {}\n",
        preview.title,
        preview.date,
        preview.description,
        preview.color,
        preview.tech.join(", ")
    )
}

fn format_issue(level: &str, issue: &ValidationIssue) -> String {
    format!("  {level} [{}] {}: {}", issue.code, issue.slug, issue.message)
}

// ============================================================================
// Tests
// ============================================================================
