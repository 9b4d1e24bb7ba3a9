use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::series::SeriesNav;
use crate::text_utils::format_display_date;
use crate::view::{post_item, PostItem};

#[derive(ramhorns::Content)]
struct ViewItem<'a> {
    post_title: &'a str,
    author: &'a str,
    date: String,
    read_time: &'a str,
    category: &'a str,
    tags: Vec<ViewTag<'a>>,
    image: &'a str,
    post_content: &'a str,
    related: Vec<PostItem>,
    series: Vec<SeriesBlock<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewTag<'a> {
    tag: &'a str,
}

// Zero-or-one element vecs drive the optional mustache sections
#[derive(ramhorns::Content)]
struct SeriesBlock<'a> {
    series_name: &'a str,
    hub_url: &'a str,
    current_part: u32,
    total_parts: u32,
    prev: Vec<NavLink<'a>>,
    next: Vec<NavLink<'a>>,
}

#[derive(ramhorns::Content)]
struct NavLink<'a> {
    link: String,
    title: &'a str,
}

pub struct PostRenderer<'a> {
    template: Template<'a>,
}

impl PostRenderer<'_> {
    pub fn new(view_tpl_src: &str) -> io::Result<PostRenderer> {
        let template = match Template::new(view_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing post view template: {}", e)));
            }
        };

        Ok(PostRenderer {
            template,
        })
    }

    pub fn render(&self, post: &Post, html_body: &str, related: &[Post], nav: Option<&SeriesNav>) -> String {
        let tags: Vec<ViewTag> = post.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let related = related.iter().map(post_item).collect();

        let series = match nav {
            Some(nav) => vec![SeriesBlock {
                series_name: nav.series_name.as_str(),
                hub_url: nav.hub_url.as_str(),
                current_part: nav.current_part as u32,
                total_parts: nav.total_parts as u32,
                prev: nav.prev.iter()
                    .map(|p| NavLink { link: format!("/blog/{}/", p.slug), title: p.title.as_str() })
                    .collect(),
                next: nav.next.iter()
                    .map(|n| NavLink { link: format!("/blog/{}/", n.slug), title: n.title.as_str() })
                    .collect(),
            }],
            None => vec![],
        };

        self.template.render(&ViewItem {
            post_title: post.title.as_str(),
            author: post.author.as_str(),
            date: format_display_date(&post.date),
            read_time: post.read_time.as_str(),
            category: post.category.as_str(),
            tags,
            image: post.image.as_deref().unwrap_or(""),
            post_content: html_body,
            related,
            series,
        })
    }
}
