use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::view::{post_item, PostItem};

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    heading: &'a str,
    post_list: Vec<PostItem>,
    categories: Vec<ViewBucket<'a>>,
    tags: Vec<ViewBucket<'a>>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct ViewBucket<'a> {
    name: &'a str,
    link: String,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
}

pub struct ListRenderer<'a> {
    template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing list template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, heading: &str, posts: &[Post], cur_page: u32, page_count: u32,
                  categories: &[String], tags: &[String]) -> String {
        let post_list = posts.iter().map(post_item).collect();

        let mut page_list: Vec<ViewPagination> = Vec::with_capacity(page_count as usize);
        for number in 1..=page_count {
            page_list.push(ViewPagination {
                current: number == cur_page,
                number,
            })
        }

        let categories = categories.iter()
            .map(|name| ViewBucket { name: name.as_str(), link: format!("/blog/category/{}", name) })
            .collect();
        let tags = tags.iter()
            .map(|name| ViewBucket { name: name.as_str(), link: format!("/blog/tag/{}", name) })
            .collect();

        self.template.render(&ListPage {
            heading,
            post_list,
            categories,
            tags,
            page_list,
            show_pagination: page_count > 1,
        })
    }
}
