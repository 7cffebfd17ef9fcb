use crate::error::{Result, ScanError};
use crate::result::ExtractedReferences;
use crate::traits::HtmlExtractor;
use scraper::{Html, Selector};

/// HTML extractor backed by `scraper`.
///
/// Any element carrying a `src` attribute is an asset reference; any anchor
/// carrying an `href` is a link reference. Blank attribute values are
/// dropped here so the engine never sees them.
pub struct ScraperExtractor {
    asset_selector: Selector,
    link_selector: Selector,
}

impl ScraperExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            asset_selector: parse_selector("[src]")?,
            link_selector: parse_selector("a[href]")?,
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::SelectorError(format!("{}: {}", css, e)))
}

impl HtmlExtractor for ScraperExtractor {
    fn extract(&self, body: &str) -> ExtractedReferences {
        let document = Html::parse_document(body);
        let mut refs = ExtractedReferences::new();

        for element in document.select(&self.asset_selector) {
            if let Some(src) = element.value().attr("src")
                && !src.trim().is_empty()
            {
                refs = refs.with_asset(src);
            }
        }

        for element in document.select(&self.link_selector) {
            if let Some(href) = element.value().attr("href")
                && !href.trim().is_empty()
            {
                refs = refs.with_link(href);
            }
        }

        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ScraperExtractor {
        ScraperExtractor::new().unwrap()
    }

    #[test]
    fn test_extracts_every_src_bearing_element() {
        let html = r#"<html><head>
                <script src="/app.js"></script>
            </head><body>
                <img src="http://sub.test.com/img.jpg">
                <img src="/img2.png">
                <iframe src="/a/img3.png"></iframe>
                <img alt="no source">
            </body></html>"#;

        let refs = extractor().extract(html);
        let srcs: Vec<&str> = refs.assets.iter().map(|a| a.raw_src.as_str()).collect();

        assert_eq!(
            srcs,
            vec!["/app.js", "http://sub.test.com/img.jpg", "/img2.png", "/a/img3.png"]
        );
        assert!(refs.links.is_empty());
    }

    #[test]
    fn test_extracts_anchor_hrefs_in_document_order() {
        let html = r#"<body>
                <a href="http://test.com/a">A</a>
                <a name="anchor-without-href">skip</a>
                <a href="/c">C</a>
                <a href="/c">C again</a>
                <link href="/style.css" rel="stylesheet">
            </body>"#;

        let refs = extractor().extract(html);
        let hrefs: Vec<&str> = refs.links.iter().map(|l| l.raw_href.as_str()).collect();

        assert_eq!(hrefs, vec!["http://test.com/a", "/c", "/c"]);
    }

    #[test]
    fn test_blank_attribute_values_are_dropped() {
        let html = r#"<img src=""><a href="   ">blank</a><a href="/ok">ok</a>"#;

        let refs = extractor().extract(html);

        assert!(refs.assets.is_empty());
        assert_eq!(refs.links.len(), 1);
        assert_eq!(refs.links[0].raw_href, "/ok");
    }

    #[test]
    fn test_malformed_html_still_yields_references() {
        let html = "<div><a href='/open'>unclosed <img src='/x.png'";

        let refs = extractor().extract(html);

        assert_eq!(refs.links.len(), 1);
        assert_eq!(refs.links[0].raw_href, "/open");
    }
}
