use std::path::Path;

use minijinja::{context, Environment};

use crate::identity::domain::identity_gallery::GalleryEntry;
use crate::report::domain::report_renderer::{rank, ReportRenderer};

const TEMPLATE_NAME: &str = "report.html";

/// Self-contained report page; thumbnails are inlined as data URIs so the
/// file can be moved or mailed on its own.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ title }}</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; background-color: #f4f4f9; }
        h1 { text-align: center; color: #333; }
        h2 { text-align: center; color: #666; font-weight: normal; margin-top: -10px; }
        .container { display: flex; flex-wrap: wrap; gap: 20px; justify-content: center; }
        .person-card {
            background-color: white;
            border: 1px solid #ddd;
            border-radius: 8px;
            padding: 15px;
            text-align: center;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            transition: transform 0.2s;
            width: 200px;
        }
        .person-card:hover { transform: translateY(-5px); }
        .person-card img { border-radius: 8px; width: 150px; height: 150px; object-fit: cover; border: 3px solid #eee; }
        .person-card h3 { margin: 10px 0 5px 0; color: #555; }
        .person-card p { margin: 0; color: #777; }
        .person-card .count { font-size: 1.2em; font-weight: bold; color: #333; }
    </style>
</head>
<body>
    <h1>{{ title }}</h1>
    <h2>Unique identities: {{ cards|length }}</h2>
    <div class="container">
    {%- for card in cards %}
        <div class="person-card">
            <img src="{{ card.thumbnail|safe }}" alt="Person #{{ card.rank }}">
            <h3>Person #{{ card.rank }}</h3>
            <p class="count">Seen in {{ card.occurrence_count }} {{ "file" if card.occurrence_count == 1 else "files" }}</p>
        </div>
    {%- endfor %}
    </div>
</body>
</html>
"#;

pub const DEFAULT_TITLE: &str = "Face Recognition Report";

#[derive(Debug, Clone, serde::Serialize)]
struct CardData {
    rank: usize,
    occurrence_count: u32,
    thumbnail: String,
}

/// Renders the gallery to a static HTML page with `minijinja`.
pub struct HtmlReportRenderer {
    template: String,
    title: String,
}

impl HtmlReportRenderer {
    pub fn new() -> Self {
        Self::with_template(DEFAULT_TEMPLATE, DEFAULT_TITLE)
    }

    pub fn with_template(template: &str, title: &str) -> Self {
        Self {
            template: template.to_string(),
            title: title.to_string(),
        }
    }

    /// Renders the page to a string without touching the filesystem.
    pub fn render_to_string(&self, entries: &[GalleryEntry]) -> Result<String, minijinja::Error> {
        let cards: Vec<CardData> = rank(entries)
            .into_iter()
            .map(|r| CardData {
                rank: r.rank,
                occurrence_count: r.occurrence_count,
                thumbnail: r.thumbnail.data_uri(),
            })
            .collect();

        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, &self.template)?;
        let tmpl = env.get_template(TEMPLATE_NAME)?;
        tmpl.render(context! {
            title => self.title,
            cards => cards,
        })
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(
        &self,
        entries: &[GalleryEntry],
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let html = self.render_to_string(entries)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, html)?;
        Ok(())
    }
}
