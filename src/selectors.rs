//! CSS selectors and text patterns for Amazon HTML parsing.
//!
//! Every selector used against Amazon markup lives here. When Amazon
//! changes their page structure, this is the file to update.

use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search results pages.
pub mod search {
    use super::*;

    /// Candidate product links on a search results page.
    pub static RESULT_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.a-link-normal.s-no-outline").unwrap());
}

/// Selectors for product detail pages.
pub mod product {
    use super::*;

    /// Product title.
    pub static TITLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span#productTitle").unwrap());

    /// Accessible rating label, e.g. "4.5 out of 5 stars".
    pub static RATING_LABEL: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "i.a-icon-star span.a-icon-alt, \
             span.a-icon-alt",
        )
        .unwrap()
    });

    /// Star rating icon whose class list embeds the rating.
    pub static RATING_ICON: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("i.a-icon-star").unwrap());

    /// Review count text, e.g. "1,234 customer reviews".
    pub static REVIEW_COUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span#acrCustomerReviewText").unwrap());

    /// Book description block.
    pub static DESCRIPTION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div#bookDescription_feature_div").unwrap());

    /// Byline container holding the author spans.
    pub static BYLINE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#bylineInfo").unwrap());

    /// Author name within the byline.
    pub static AUTHOR: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.author").unwrap());

    /// Main cover image.
    pub static COVER_IMAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("img#landingImage").unwrap());

    /// Whole-number price part.
    pub static PRICE_WHOLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-price-whole").unwrap());

    /// Screen-reader price text.
    pub static PRICE_OFFSCREEN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-offscreen").unwrap());

    /// List-price text variant.
    pub static PRICE_TEXT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.a-price.a-text-price").unwrap());

    /// Price selectors in the order they should be tried.
    pub fn price_candidates() -> [&'static Selector; 3] {
        [&PRICE_WHOLE, &PRICE_OFFSCREEN, &PRICE_TEXT]
    }
}

/// Text patterns applied to extracted fragments and URLs.
pub mod patterns {
    use super::*;

    /// Star rating embedded in an icon class, e.g. "a-star-4-5".
    pub static STAR_CLASS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"a-star-(\d+)(?:-(\d+))?").unwrap());

    /// First integer group, with optional thousands separators.
    pub static COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:,\d+)*)").unwrap());

    /// ISBN/ASIN path segment of a product URL.
    pub static PRODUCT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/dp/([^/?#]+)").unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        // Force evaluation of all lazy selectors to ensure they compile
        let _ = &*search::RESULT_LINK;
        let _ = &*product::TITLE;
        let _ = &*product::RATING_LABEL;
        let _ = &*product::RATING_ICON;
        let _ = &*product::REVIEW_COUNT;
        let _ = &*product::DESCRIPTION;
        let _ = &*product::BYLINE;
        let _ = &*product::AUTHOR;
        let _ = &*product::COVER_IMAGE;
        let _ = product::price_candidates();
    }

    #[test]
    fn test_patterns_compile() {
        let _ = &*patterns::STAR_CLASS;
        let _ = &*patterns::COUNT;
        let _ = &*patterns::PRODUCT_ID;
    }

    #[test]
    fn test_result_link_matching() {
        let html = Html::parse_document(
            r#"<div>
                <a class="a-link-normal s-no-outline" href="/dp/0813141117">cover</a>
                <a class="a-link-normal" href="/other">not a result</a>
            </div>"#,
        );
        let links: Vec<_> = html.select(&search::RESULT_LINK).collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].value().attr("href"), Some("/dp/0813141117"));
    }

    #[test]
    fn test_product_id_pattern() {
        let caps = patterns::PRODUCT_ID
            .captures("https://www.amazon.com/dp/0813141117/ref=sr_1_1?keywords=x")
            .unwrap();
        assert_eq!(&caps[1], "0813141117");
    }
}
