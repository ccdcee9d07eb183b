//! Per-field extraction from parsed product pages.
//!
//! Each extractor is independent and infallible at its boundary: a missing
//! element, missing attribute, or malformed fragment yields the field's
//! absent value. One broken block on the page never costs another field.

use scraper::Html;

use crate::selectors::{patterns, product};

/// Symbols a price fragment must contain to be accepted as a price.
const CURRENCY_SYMBOLS: [char; 4] = ['$', '£', '€', '¥'];

/// Extracts the product title, or an empty string.
pub fn title(document: &Html) -> String {
    document
        .select(&product::TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the star rating.
///
/// The accessible label ("4.5 out of 5 stars") is tried first; the rating
/// embedded in the star icon's class list is the fallback.
pub fn rating(document: &Html) -> Option<f64> {
    rating_from_label(document).or_else(|| rating_from_star_class(document))
}

fn rating_from_label(document: &Html) -> Option<f64> {
    let label = document.select(&product::RATING_LABEL).next()?;
    parse_rating_label(&label.text().collect::<String>())
}

fn parse_rating_label(text: &str) -> Option<f64> {
    let value: f64 = text.split_whitespace().next()?.parse().ok()?;
    (0.0..=5.0).contains(&value).then_some(value)
}

fn rating_from_star_class(document: &Html) -> Option<f64> {
    let icon = document.select(&product::RATING_ICON).next()?;
    parse_star_class(icon.value().attr("class")?)
}

fn parse_star_class(classes: &str) -> Option<f64> {
    let caps = patterns::STAR_CLASS.captures(classes)?;
    let whole: f64 = caps.get(1)?.as_str().parse().ok()?;
    let fraction: f64 = caps
        .get(2)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);
    Some(whole + fraction / 10.0)
}

/// Extracts the customer review count.
pub fn review_count(document: &Html) -> Option<u64> {
    let el = document.select(&product::REVIEW_COUNT).next()?;
    parse_review_count(&el.text().collect::<String>())
}

fn parse_review_count(text: &str) -> Option<u64> {
    let caps = patterns::COUNT.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse().ok()
}

/// Extracts the book description, or an empty string.
pub fn description(document: &Html) -> String {
    document
        .select(&product::DESCRIPTION)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts the listed authors in page order.
///
/// Each name is trimmed and cut at the parenthetical role marker Amazon
/// appends ("Jane Doe \n(Author)" becomes "Jane Doe").
pub fn authors(document: &Html) -> Vec<String> {
    let Some(byline) = document.select(&product::BYLINE).next() else {
        return Vec::new();
    };
    byline
        .select(&product::AUTHOR)
        .map(|el| {
            let text = el.text().collect::<String>();
            let text = text.trim();
            match text.find(" \n(") {
                Some(idx) => text[..idx].to_string(),
                None => text.to_string(),
            }
        })
        .collect()
}

/// Extracts the ISBN or ASIN from the product URL path.
pub fn isbn(url: &str) -> Option<String> {
    patterns::PRODUCT_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts the cover image URL, or an empty string.
pub fn cover_image_url(document: &Html) -> String {
    document
        .select(&product::COVER_IMAGE)
        .next()
        .and_then(|el| el.value().attr("src"))
        .unwrap_or_default()
        .to_string()
}

/// Extracts the displayed price, or an empty string.
///
/// Price selectors are tried in order; the first whose text carries a
/// currency symbol wins. Text without a currency symbol is rejected so a
/// bare number from an unrelated element is never mistaken for a price.
pub fn price(document: &Html) -> String {
    for selector in product::price_candidates() {
        if let Some(el) = document.select(selector).next() {
            let text = el.text().collect::<String>().trim().to_string();
            if !text.is_empty() && text.chars().any(|c| CURRENCY_SYMBOLS.contains(&c)) {
                return text;
            }
        }
    }
    String::new()
}
