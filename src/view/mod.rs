use std::io;
use std::io::ErrorKind;

use markdown::Options;

use crate::post::Post;
use crate::text_utils::format_display_date;

pub mod list_renderer;
pub mod post_renderer;
pub mod series_renderer;
pub mod rss_renderer;
pub mod sitemap_renderer;
pub mod index_renderer;

/// The body is opaque to the content core; this is the only place it meets
/// the markdown renderer.
pub fn markdown_to_html(md_text: &str) -> io::Result<String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(html) => Ok(html),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}

/// One entry in any post listing (blog page, series hub, related box).
#[derive(ramhorns::Content)]
pub struct PostItem {
    pub date: String,
    pub link: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub read_time: String,
}

pub fn post_item(post: &Post) -> PostItem {
    PostItem {
        date: format_display_date(&post.date),
        link: format!("/blog/{}/", post.slug),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        author: post.author.clone(),
        category: post.category.clone(),
        read_time: post.read_time.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::POST_MORPHO_1;

    use super::*;

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("# Title\n\nSome **bold** text.").unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_post_item_link_and_date() {
        let post = Post::from_string("morpho-internals-part-1", POST_MORPHO_1).unwrap();
        let item = post_item(&post);
        assert_eq!(item.link, "/blog/morpho-internals-part-1/");
        assert_eq!(item.date, "January 15, 2024");
    }
}
