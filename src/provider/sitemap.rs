//! XML sitemap generation for the simulated audit.

use chrono::NaiveDate;
use url::Url;

use crate::error_handling::AnalysisError;

/// Site sections the simulated crawl "discovers" on every site.
pub(crate) const SECTION_PATHS: &[&str] = &[
    "/about",
    "/services",
    "/blog",
    "/contact",
    "/products/cool-product-1",
];

/// Builds the sitemap document and the discovered-links list for a site.
///
/// The root URL is listed first at priority 0.8; section pages follow at
/// 0.6. All entries carry a weekly change frequency and `today` as the
/// last-modified date.
pub(crate) fn generate(
    base: &Url,
    today: NaiveDate,
) -> Result<(String, Vec<String>), AnalysisError> {
    let join = |path: &str| -> Result<String, AnalysisError> {
        base.join(path)
            .map(|u| u.to_string())
            .map_err(|e| AnalysisError::Provider(format!("could not derive site link: {e}")))
    };

    let main_url = join("/")?;
    let mut discovered_links = vec![main_url.clone()];
    for path in SECTION_PATHS {
        discovered_links.push(join(path)?);
    }

    let mut entries = String::new();
    for link in &discovered_links[1..] {
        entries.push_str(&format!(
            "\n  <url>\n    <loc>{link}</loc>\n    <lastmod>{today}</lastmod>\n    \
             <changefreq>weekly</changefreq>\n    <priority>0.6</priority>\n  </url>"
        ));
    }

    let sitemap_xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n  <url>\n    \
         <loc>{main_url}</loc>\n    <lastmod>{today}</lastmod>\n    \
         <changefreq>weekly</changefreq>\n    <priority>0.8</priority>\n  </url>{entries}\n\
         </urlset>\n"
    );

    Ok((sitemap_xml, discovered_links))
}
