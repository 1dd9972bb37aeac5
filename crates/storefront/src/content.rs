//! Content management for the catalog, service pages, and static pages.
//!
//! Catalog and page content are data, not logic: markdown files with YAML
//! frontmatter under the `content/` directory, loaded once at startup and
//! held in memory. Editing a product means editing a file, not code.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Errors that can occur while loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Metadata for static pages (about, terms, etc.)
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// Metadata for service category pages.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Bullet list of covered jobs shown on the service page.
    #[serde(default)]
    pub items: Vec<String>,
    /// Sort position within the services listing.
    #[serde(default)]
    pub position: i32,
}

/// Metadata for catalog products.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductMeta {
    pub title: String,
    /// Unit price. Quoted in the frontmatter to keep decimal precision.
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Sort position within the catalog grid.
    #[serde(default)]
    pub position: i32,
}

/// A rendered page with metadata and HTML content.
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// A rendered service category page.
#[derive(Debug, Clone)]
pub struct Service {
    pub slug: String,
    pub meta: ServiceMeta,
    pub content_html: String,
}

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    pub slug: String,
    pub meta: ProductMeta,
    pub content_html: String,
}

/// Content store that holds all loaded content in memory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
    services: Arc<Vec<Service>>,
    products: Arc<Vec<Product>>,
}

impl ContentStore {
    /// Load all content from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if a content directory cannot be read. Individual
    /// files that fail to parse are logged and skipped so one broken file
    /// does not take the site down.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let pages = Self::load_dir(&content_dir.join("pages"), parse_page)?;
        let mut services = Self::load_dir(&content_dir.join("services"), parse_service)?
            .into_values()
            .collect::<Vec<_>>();
        let mut products = Self::load_dir(&content_dir.join("products"), parse_product)?
            .into_values()
            .collect::<Vec<_>>();

        services.sort_by(|a, b| (a.meta.position, &a.slug).cmp(&(b.meta.position, &b.slug)));
        products.sort_by(|a, b| (a.meta.position, &a.slug).cmp(&(b.meta.position, &b.slug)));

        Ok(Self {
            pages: Arc::new(pages),
            services: Arc::new(services),
            products: Arc::new(products),
        })
    }

    /// Load every markdown file in a directory through the given parser.
    fn load_dir<T>(
        dir: &Path,
        parse: fn(&str, &str) -> Result<T, ContentError>,
    ) -> Result<HashMap<String, T>, ContentError> {
        let mut loaded = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Content directory does not exist: {:?}", dir);
            return Ok(loaded);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "md") {
                continue;
            }

            let Some(slug) = path.file_stem().and_then(|s| s.to_str()).map(String::from) else {
                tracing::error!("Skipping content file with invalid name: {:?}", path);
                continue;
            };

            let raw = std::fs::read_to_string(&path).map_err(|e| ContentError::Io(e.to_string()))?;
            match parse(&slug, &raw) {
                Ok(item) => {
                    tracing::info!("Loaded content: {slug}");
                    loaded.insert(slug, item);
                }
                Err(e) => {
                    tracing::error!("Failed to load content {:?}: {}", path, e);
                }
            }
        }

        Ok(loaded)
    }

    /// Get a page by slug.
    #[must_use]
    pub fn page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// All service categories in display order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Get a service category by slug.
    #[must_use]
    pub fn service(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// All catalog products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Get a product by slug.
    #[must_use]
    pub fn product(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }
}

/// Parse a static page from raw markdown with frontmatter.
fn parse_page(slug: &str, raw: &str) -> Result<Page, ContentError> {
    let (meta, content_html) = parse_frontmatter::<PageMeta>(raw)?;
    Ok(Page {
        slug: slug.to_string(),
        meta,
        content_html,
    })
}

/// Parse a service category from raw markdown with frontmatter.
fn parse_service(slug: &str, raw: &str) -> Result<Service, ContentError> {
    let (meta, content_html) = parse_frontmatter::<ServiceMeta>(raw)?;
    Ok(Service {
        slug: slug.to_string(),
        meta,
        content_html,
    })
}

/// Parse a product from raw markdown with frontmatter.
fn parse_product(slug: &str, raw: &str) -> Result<Product, ContentError> {
    let (meta, content_html) = parse_frontmatter::<ProductMeta>(raw)?;
    Ok(Product {
        slug: slug.to_string(),
        meta,
        content_html,
    })
}

/// Split YAML frontmatter from the body and render the body to HTML.
fn parse_frontmatter<T: serde::de::DeserializeOwned>(
    raw: &str,
) -> Result<(T, String), ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<T> = matter
        .parse(raw)
        .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;

    Ok((meta, render_markdown(&parsed.content)))
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;

    markdown_to_html(content, &options)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product() {
        let raw = "---\ntitle: Kit C\nprice: \"780\"\ndescription: Maintenance kit\nimage: /static/images/products/kit-c.jpg\n---\nA complete kit for *routine* maintenance.\n";
        let product = parse_product("kit-c", raw).unwrap();

        assert_eq!(product.slug, "kit-c");
        assert_eq!(product.meta.title, "Kit C");
        assert_eq!(product.meta.price, Decimal::from(780));
        assert_eq!(product.meta.position, 0);
        assert!(product.content_html.contains("<em>routine</em>"));
    }

    #[test]
    fn test_parse_service_with_items() {
        let raw = "---\ntitle: Drain Clearing\nitems:\n  - Sewer lines\n  - Storm drains\nposition: 1\n---\nWe clear blocked drains of every kind.\n";
        let service = parse_service("drain-clearing", raw).unwrap();

        assert_eq!(service.meta.items.len(), 2);
        assert_eq!(service.meta.items[0], "Sewer lines");
        assert_eq!(service.meta.position, 1);
    }

    #[test]
    fn test_parse_page_missing_frontmatter() {
        let result = parse_page("broken", "Just a body with no frontmatter.\n");
        assert!(matches!(result, Err(ContentError::Parse(_))));
    }

    #[test]
    fn test_render_markdown_basics() {
        let html = render_markdown("# Heading\n\nSome **bold** text.");
        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }
}
