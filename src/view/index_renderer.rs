use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::Post;
use crate::view::{post_item, PostItem};

#[derive(ramhorns::Content)]
struct IndexPage {
    post_count: u32,
    featured: Vec<PostItem>,
}

pub struct IndexRenderer<'a> {
    template: Template<'a>,
}

impl IndexRenderer<'_> {
    pub fn new(index_tpl_src: &str) -> io::Result<IndexRenderer> {
        let template = match Template::new(index_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing index template: {}", e)));
            }
        };

        Ok(IndexRenderer {
            template,
        })
    }

    pub fn render(&self, post_count: usize, featured: &[Post]) -> String {
        self.template.render(&IndexPage {
            post_count: post_count as u32,
            featured: featured.iter().map(post_item).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::POST_MORPHO_1;

    use super::*;

    #[test]
    fn test_render_index() {
        let template_src = "COUNT=[{{post_count}}] FEATURED=[{{#featured}}({{title}}){{/featured}}]";
        let featured = vec![Post::from_string("morpho-internals-part-1", POST_MORPHO_1).unwrap()];

        let renderer = IndexRenderer::new(template_src).unwrap();
        let res = renderer.render(5, &featured);
        assert_eq!(res, "COUNT=[5] FEATURED=[(Morpho Internals Part 1: The Singleton)]");
    }
}
