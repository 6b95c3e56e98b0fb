use std::fs;
use std::path::Path;

use mdsite::site::{SiteError, build_site};
use mdsite::{Config, PathsConfig, SiteConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TEMPLATE: &str = "<html><head><title>{{ Title }}</title><link href=\"/index.css\" rel=\"stylesheet\"></head><body>{{ Content }}</body></html>";

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn config_for(root: &Path, base_path: &str) -> Config {
    Config {
        paths: PathsConfig {
            content: root.join("content"),
            static_dir: root.join("static"),
            output: root.join("public"),
            template: root.join("template.html"),
        },
        site: SiteConfig {
            base_path: base_path.to_string(),
        },
    }
}

#[test]
fn builds_nested_site() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("static/index.css"), "body { color: black; }");
    write(&root.join("static/images/tolkien.png"), "png");
    write(
        &root.join("content/index.md"),
        "# Tolkien Fan Club\n\n![portrait](/images/tolkien.png)\n\nRead [the blog](/blog/glorfindel)",
    );
    write(
        &root.join("content/blog/glorfindel/index.md"),
        "# Why Glorfindel is More Impressive than Legolas\n\n- a\n- b",
    );
    write(&root.join("content/notes.txt"), "not markdown");

    let report = build_site(&config_for(root, "/")).unwrap();

    assert!(report.is_success());
    assert_eq!(report.assets_copied, 2);
    assert_eq!(report.pages.len(), 2);
    assert!(root.join("public/images/tolkien.png").exists());
    assert!(!root.join("public/notes.txt").exists());
    assert!(!root.join("public/notes.html").exists());

    assert_eq!(
        fs::read_to_string(root.join("public/index.html")).unwrap(),
        "<html><head><title>Tolkien Fan Club</title><link href=\"/index.css\" rel=\"stylesheet\"></head><body><div><h1>Tolkien Fan Club</h1><p><img src=\"/images/tolkien.png\" alt=\"portrait\"></img></p><p>Read <a href=\"/blog/glorfindel\">the blog</a></p></div></body></html>"
    );
    assert_eq!(
        fs::read_to_string(root.join("public/blog/glorfindel/index.html")).unwrap(),
        "<html><head><title>Why Glorfindel is More Impressive than Legolas</title><link href=\"/index.css\" rel=\"stylesheet\"></head><body><div><h1>Why Glorfindel is More Impressive than Legolas</h1><ul><li>a</li><li>b</li></ul></div></body></html>"
    );
}

#[test]
fn base_path_is_applied_to_every_page() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("content/index.md"), "# Home\n\n[contact](/contact)");

    let report = build_site(&config_for(root, "/my-site/")).unwrap();
    assert!(report.is_success());
    assert_eq!(report.assets_copied, 0);

    let page = fs::read_to_string(root.join("public/index.html")).unwrap();
    assert!(page.contains("<link href=\"/my-site/index.css\""));
    assert!(page.contains("<a href=\"/my-site/contact\">contact</a>"));
}

#[test]
fn bad_document_does_not_stop_other_pages() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("content/a_good.md"), "# Good\n\nFine text");
    write(&root.join("content/b_unclosed.md"), "# Broken\n\nThis **never closes");
    write(&root.join("content/c_untitled.md"), "No heading here");

    let report = build_site(&config_for(root, "/")).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.pages, vec![root.join("public/a_good.html")]);
    assert_eq!(report.failures.len(), 2);
    assert!(matches!(
        report.failures[0],
        SiteError::Page {
            source: mdsite::Error::UnmatchedDelimiter { .. },
            ..
        }
    ));
    assert!(matches!(
        report.failures[1],
        SiteError::Page {
            source: mdsite::Error::NotATitle { .. },
            ..
        }
    ));
    assert!(!root.join("public/b_unclosed.html").exists());
}

#[test]
fn missing_template_is_an_error() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("content/index.md"), "# Home");

    assert!(matches!(
        build_site(&config_for(root, "/")),
        Err(SiteError::Io { .. })
    ));
}

#[test]
fn output_pointing_at_content_keeps_sources() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("content/index.md"), "# Home");

    let mut config = config_for(root, "/");
    config.paths.output = root.join("content");

    assert!(matches!(
        build_site(&config),
        Err(SiteError::OutputOverlapsSource { .. })
    ));
    assert!(root.join("content/index.md").exists());
}

#[test]
fn output_containing_static_and_template_is_refused() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("template.html"), TEMPLATE);
    write(&root.join("static/index.css"), "body {}");
    write(&root.join("content/index.md"), "# Home");

    let mut config = config_for(root, "/");
    config.paths.output = root.to_path_buf();

    assert!(matches!(
        build_site(&config),
        Err(SiteError::OutputOverlapsSource { .. })
    ));
    assert!(root.join("static/index.css").exists());
    assert!(root.join("template.html").exists());
}
