//! HTML fixtures shaped like the IMDb `/reviews/_ajax` listing.

#![allow(dead_code)]

pub const MOVIE_ID: &str = "tt0088092";

pub fn review_block(review_id: &str, title: &str, rating: Option<&str>, body: &str) -> String {
    let rating_bar = match rating {
        Some(rating) => format!(
            r#"<div class="ipl-ratings-bar">
                <span class="rating-other-user-rating">
                    <svg class="ipl-icon ipl-star-icon"></svg>
                    <span>{rating}</span><span class="point-scale">/10</span>
                </span>
            </div>"#
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="lister-item mode-detail imdb-user-review" data-review-id="{review_id}">
            <div class="lister-item-content">
                {rating_bar}
                <a href="/review/{review_id}/?ref_=tt_urv" class="title">{title}</a>
                <div class="content">
                    <div class="text show-more__control">{body}</div>
                </div>
            </div>
        </div>"#
    )
}

/// `count` rated reviews with ids `rw{page}{index}`
pub fn rated_blocks(page: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            review_block(
                &format!("rw{}{:03}", page, i),
                &format!("Review {} of page {}", i, page),
                Some("8"),
                &format!("Body {}-{}", page, i),
            )
        })
        .collect()
}

pub fn ajax_page(blocks: &[String], cursor: Option<&str>) -> String {
    let load_more = match cursor {
        Some(key) => format!(r#"<div class="load-more-data" data-key="{key}"></div>"#),
        None => String::new(),
    };
    format!(
        r#"<div class="lister">
            <div class="lister-list">{}</div>
            {load_more}
        </div>"#,
        blocks.join("\n")
    )
}

pub fn reviews_path(movie_id: &str) -> String {
    format!("/title/{}/reviews/_ajax", movie_id)
}
