use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use thiserror::Error;

use crate::config::Config;
use crate::{extract_title, markdown_to_html};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to convert {path}: {source}")]
    Page {
        path: PathBuf,
        source: crate::Error,
    },

    /// Cleaning `output` would delete `input`.
    #[error("Refusing to clean {output}: it contains the site source {input}")]
    OutputOverlapsSource { output: PathBuf, input: PathBuf },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Outcome of a site build. Pages that failed do not stop the others.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub assets_copied: usize,
    pub pages: Vec<PathBuf>,
    pub failures: Vec<SiteError>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Absolute, symlink-free form of `path`. Components that do not exist yet
/// are appended to the nearest existing ancestor.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match path.file_name() {
        Some(name) => resolve(parent).join(name),
        None => path.to_path_buf(),
    }
}

/// Fail unless `output` can be deleted without touching any of `inputs`.
fn ensure_output_clear_of(output: &Path, inputs: &[&Path]) -> Result<(), SiteError> {
    let resolved_output = resolve(output);
    for input in inputs {
        if resolve(input).starts_with(&resolved_output) {
            return Err(SiteError::OutputOverlapsSource {
                output: output.to_path_buf(),
                input: input.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Replace `dst` with a recursive copy of `src`. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    ensure_output_clear_of(dst, &[src])?;
    if dst.exists() {
        fs::remove_dir_all(dst).map_err(io_err(dst))?;
    }
    copy_dir(src, dst)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(dst).map_err(io_err(dst))?;

    let mut copied = 0;
    for entry in fs::read_dir(src).map_err(io_err(src))? {
        let from = entry.map_err(io_err(src))?.path();
        let Some(name) = from.file_name() else {
            continue;
        };
        let to = dst.join(name);

        if from.is_dir() {
            copied += copy_dir(&from, &to)?;
        } else {
            info!("Copying {} -> {}", from.display(), to.display());
            fs::copy(&from, &to).map_err(io_err(&from))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Fill the template placeholders and point root-relative URLs at `base_path`.
pub fn apply_template(template: &str, title: &str, content: &str, base_path: &str) -> String {
    let page = template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content);

    let base = if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        format!("{base_path}/")
    };
    if base == "/" {
        return page;
    }

    page.replace("href=\"/", &format!("href=\"{base}"))
        .replace("src=\"/", &format!("src=\"{base}"))
}

/// Render one markdown file into a complete HTML page at `dest_path`.
pub fn generate_page(
    markdown_path: &Path,
    template: &str,
    dest_path: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    info!(
        "Generating page from {} to {}",
        markdown_path.display(),
        dest_path.display()
    );

    let markdown = fs::read_to_string(markdown_path)
        .map_err(io_err(markdown_path))?
        .replace("\r\n", "\n");

    let page_err = |source| SiteError::Page {
        path: markdown_path.to_path_buf(),
        source,
    };
    let content = markdown_to_html(&markdown).map_err(page_err)?;
    let title = extract_title(&markdown).map_err(page_err)?;

    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let page = apply_template(template, &title, &content, base_path);
    fs::write(dest_path, page).map_err(io_err(dest_path))
}

/// Walk `content_dir` and render every `.md` file to the mirrored `.html`
/// path under `dest_dir`.
pub fn generate_pages(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
) -> Result<BuildReport, SiteError> {
    let mut report = BuildReport::default();
    walk_content(content_dir, template, dest_dir, base_path, &mut report)?;
    Ok(report)
}

fn walk_content(
    dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
    report: &mut BuildReport,
) -> Result<(), SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err(dir))?;
    entries.sort();

    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };

        if path.is_dir() {
            walk_content(&path, template, &dest_dir.join(name), base_path, report)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            let dest = dest_dir.join(name).with_extension("html");
            match generate_page(&path, template, &dest, base_path) {
                Ok(()) => report.pages.push(dest),
                // A bad document only costs that page; I/O trouble stops the build.
                Err(e @ SiteError::Page { .. }) => {
                    error!("{e}");
                    report.failures.push(e);
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok(())
}

/// Copy static assets into a clean output directory, then generate every page.
pub fn build_site(config: &Config) -> Result<BuildReport, SiteError> {
    let paths = &config.paths;
    ensure_output_clear_of(
        &paths.output,
        &[
            paths.content.as_path(),
            paths.static_dir.as_path(),
            paths.template.as_path(),
        ],
    )?;

    let assets_copied = if paths.static_dir.exists() {
        copy_tree(&paths.static_dir, &paths.output)?
    } else {
        info!(
            "No static directory at {}, starting from an empty output",
            paths.static_dir.display()
        );
        if paths.output.exists() {
            fs::remove_dir_all(&paths.output).map_err(io_err(&paths.output))?;
        }
        fs::create_dir_all(&paths.output).map_err(io_err(&paths.output))?;
        0
    };

    let template = fs::read_to_string(&paths.template).map_err(io_err(&paths.template))?;
    let mut report = generate_pages(&paths.content, &template, &paths.output, &config.site.base_path)?;
    report.assets_copied = assets_copied;
    Ok(report)
}
