use scraper::{ElementRef, Html, Selector};

use crate::error::SourceError;

const REVIEW_BLOCK: &str = "div.lister-item-content";
const TITLE_LINK: &str = "a.title";
const ANY_LINK: &str = "a";
const RATING: &str = "div.ipl-ratings-bar > span > span:nth-child(2)";
const BODY: &str = "div.content > div.text.show-more__control";
const PAGINATION: &str = "body > div > div.load-more-data";
const PAGINATION_ATTR: &str = "data-key";

/// One review block as found in the markup, before any validation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReview {
    pub review_id: Option<String>,
    pub title: String,
    pub rating: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPage {
    pub reviews: Vec<ParsedReview>,
    pub cursor: Option<String>,
}

/// Compiled selectors for the `/reviews/_ajax` listing markup
pub struct ReviewPageSelectors {
    block: Selector,
    title_link: Selector,
    any_link: Selector,
    rating: Selector,
    body: Selector,
    pagination: Selector,
}

impl ReviewPageSelectors {
    pub fn new() -> Result<Self, SourceError> {
        Ok(Self {
            block: compile(REVIEW_BLOCK)?,
            title_link: compile(TITLE_LINK)?,
            any_link: compile(ANY_LINK)?,
            rating: compile(RATING)?,
            body: compile(BODY)?,
            pagination: compile(PAGINATION)?,
        })
    }
}

fn compile(selector: &'static str) -> Result<Selector, SourceError> {
    Selector::parse(selector).map_err(|e| SourceError::Selector {
        selector,
        message: e.to_string(),
    })
}

pub fn parse_review_page(selectors: &ReviewPageSelectors, html: &str) -> ReviewPage {
    let document = Html::parse_document(html);

    let reviews = document
        .select(&selectors.block)
        .map(|block| parse_review_block(selectors, block))
        .collect();

    ReviewPage {
        reviews,
        cursor: extract_cursor(selectors, &document),
    }
}

fn parse_review_block(selectors: &ReviewPageSelectors, block: ElementRef<'_>) -> ParsedReview {
    let review_id = block
        .select(&selectors.title_link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .and_then(review_id_from_href);

    ParsedReview {
        review_id,
        // Every link in the block, the reviewer's name included
        title: select_text(block, &selectors.any_link),
        rating: select_text(block, &selectors.rating),
        body: select_text(block, &selectors.body),
    }
}

fn extract_cursor(selectors: &ReviewPageSelectors, document: &Html) -> Option<String> {
    document
        .select(&selectors.pagination)
        .next()
        .and_then(|node| node.value().attr(PAGINATION_ATTR))
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

/// Pull `rw1234567` out of hrefs like `/review/rw1234567/?ref_=tt_urv`
pub fn review_id_from_href(href: &str) -> Option<String> {
    href.split(['/', '?'])
        .find(|segment| {
            segment.len() > 2
                && segment.starts_with("rw")
                && segment[2..].chars().all(|c| c.is_ascii_digit())
        })
        .map(str::to_string)
}

/// Text of every match joined by a space, whitespace collapsed
fn select_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn element_text(element: ElementRef<'_>) -> String {
    // Text nodes split by <br> must not run together
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the star rating shown next to a review
pub fn parse_rating(text: &str) -> Result<f64, SourceError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SourceError::InvalidRating(trimmed.to_string())),
    }
}
