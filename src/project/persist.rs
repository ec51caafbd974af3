//! Project file I/O
//!
//! Projects are saved as pretty-printed JSON with a `.gmt` extension.
//! Coordinates are stored as whole pixels (truncated), so a saved and
//! reloaded region may differ from the live one by less than a pixel.
//! Region identifiers survive the round trip and must stay unique across
//! the whole file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::domain::{Point, Region, RegionId};
use crate::project::{DisplayFlags, Page, Project};

pub const PROJECT_EXTENSION: &str = "gmt";

#[derive(Serialize, Deserialize)]
struct ProjectFile {
    pages: Vec<PageEntry>,
}

#[derive(Serialize, Deserialize)]
struct PageEntry {
    path: PathBuf,
    gui_info: DisplayFlags,
    text: Vec<TextEntry>,
}

#[derive(Serialize, Deserialize)]
struct TextEntry {
    id: String,
    start: PointEntry,
    end: PointEntry,
    #[serde(default)]
    raw_text: Option<String>,
    #[serde(default)]
    machine_translation: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct PointEntry {
    x: i64,
    y: i64,
}

impl From<Point> for PointEntry {
    fn from(p: Point) -> Self {
        Self {
            x: p.x as i64,
            y: p.y as i64,
        }
    }
}

impl From<PointEntry> for Point {
    fn from(p: PointEntry) -> Self {
        Point::new(p.x as f32, p.y as f32)
    }
}

fn text_entry(region: &Region) -> TextEntry {
    TextEntry {
        id: region.id().to_string(),
        start: region.origin().into(),
        end: region.end().into(),
        raw_text: region.detected_text.clone(),
        machine_translation: region.translated_text.clone(),
    }
}

// Hand-edited files may carry "" where the writer would put null
fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Serialize a project to the on-disk JSON form.
/// Any active page must be flushed back first.
pub fn to_json(project: &Project) -> anyhow::Result<String> {
    let file = ProjectFile {
        pages: project
            .pages()
            .iter()
            .map(|page| PageEntry {
                path: page.path.clone(),
                gui_info: page.flags,
                text: page.regions.iter().map(text_entry).collect(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&file).context("serializing project")
}

/// Parse the on-disk JSON form back into a project
pub fn from_json(json: &str) -> anyhow::Result<Project> {
    let file: ProjectFile = serde_json::from_str(json).context("parsing project JSON")?;
    let mut seen = HashSet::new();
    let mut project = Project::new();
    for entry in file.pages {
        let mut page = Page::new(entry.path);
        page.flags = entry.gui_info;
        for text in entry.text {
            let id: RegionId = text
                .id
                .parse()
                .with_context(|| format!("invalid region id {:?}", text.id))?;
            if !seen.insert(id) {
                bail!("duplicate region id {id} in project file");
            }
            page.regions.push(Region::from_saved(
                id,
                text.start.into(),
                text.end.into(),
                none_if_empty(text.raw_text),
                none_if_empty(text.machine_translation),
            ));
        }
        project.add_page(page);
    }
    Ok(project)
}

pub fn save(project: &Project, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = to_json(project)?;
    fs::write(path, json).with_context(|| format!("writing project file {}", path.display()))?;
    log::info!("saved project to {}", path.display());
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Project> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading project file {}", path.display()))?;
    from_json(&json).with_context(|| format!("loading project file {}", path.display()))
}
