use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::view::{post_item, PostItem};

#[derive(ramhorns::Content)]
struct SeriesPage<'a> {
    series_name: &'a str,
    total_parts: u32,
    post_list: Vec<PostItem>,
}

/// Hub page for one series: every member in part order.
pub struct SeriesRenderer<'a> {
    template: Template<'a>,
}

impl SeriesRenderer<'_> {
    pub fn new(series_tpl_src: &str) -> io::Result<SeriesRenderer> {
        let template = match Template::new(series_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing series template: {}", e)));
            }
        };

        Ok(SeriesRenderer {
            template,
        })
    }

    pub fn render(&self, series_name: &str, members: &[Post]) -> String {
        self.template.render(&SeriesPage {
            series_name,
            total_parts: members.len() as u32,
            post_list: members.iter().map(post_item).collect(),
        })
    }
}
