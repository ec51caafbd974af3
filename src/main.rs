use anyhow::Context;
use pagetext::project::persist;

/// Print a summary of a saved project file.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = std::env::args()
        .nth(1)
        .context("usage: pagetext <project.gmt>")?;
    let project = persist::load(&path)?;

    println!("{}: {} page(s)", path, project.len());
    for (index, page) in project.pages().iter().enumerate() {
        let recognized = page
            .regions
            .iter()
            .filter(|r| r.detected_text.is_some())
            .count();
        let translated = page
            .regions
            .iter()
            .filter(|r| r.translated_text.is_some())
            .count();
        println!(
            "  page {:>3}  {}  regions: {:>3}  recognized: {:>3}  translated: {:>3}  order: {}  overlay text: {}",
            index + 1,
            page.path.display(),
            page.regions.len(),
            recognized,
            translated,
            page.flags.showing_order,
            page.flags.showing_overlay_text,
        );
    }
    Ok(())
}
