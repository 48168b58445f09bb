//! Landing page
//!
//! Renders the embedded HTML template for the shared file.

use super::file::SharedFile;
use minijinja::{Environment, context};

const TEMPLATE_NAME: &str = "index.html";
const TEMPLATE: &str = include_str!("../../assets/index.html");

/// Template environment with the landing page loaded.
/// The `.html` name turns on HTML auto-escaping.
fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(env)
}

/// Render the landing page for `file`
pub fn render(file: &SharedFile) -> Result<String, minijinja::Error> {
    let env = environment()?;
    let size = file.human_size();

    env.get_template(TEMPLATE_NAME)?.render(context! {
        filename => file.name.as_str(),
        size => size.trim(),
        hash => file.hash.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shared(name: &str, size: u64) -> SharedFile {
        SharedFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            size,
            hash: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string(),
        }
    }

    #[test]
    fn test_render_shows_all_values() {
        let html = render(&shared("backup.tar.gz", 1536)).unwrap();

        assert!(html.contains("<h1>backup.tar.gz</h1>"));
        assert!(html.contains("<dd>1.5 KB</dd>"));
        assert!(html.contains(
            "<code>e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855</code>"
        ));
        assert!(html.contains("href=\"/file\""));
        assert!(html.contains("href=\"/hash\""));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_escapes_filename() {
        let html = render(&shared("<script>alert('x')</script>&\"", 0)).unwrap();

        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert('x')"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn test_template_braces_in_filename_stay_literal() {
        let html = render(&shared("{{ hash }}.txt", 0)).unwrap();
        assert!(html.contains("<h1>{{ hash }}.txt</h1>"));
    }
}
