use std::io::Cursor;

use chrono::Utc;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::Post;
use crate::text_utils::format_date;

/// A static page entry and its crawl hints.
pub struct StaticPage<'a> {
    pub path: &'a str,
    pub change_freq: &'a str,
    pub priority: &'a str,
}

pub struct Sitemap<'a> {
    pub base_url: &'a str,
}

impl<'a> Sitemap<'a> {
    pub fn render(&self, static_pages: &[StaticPage], posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"));
        writer.write_event(Event::Start(urlset))?;

        let base_url = self.base_url.trim_end_matches('/');
        let today = format_date(&Utc::now().date_naive());

        for page in static_pages {
            self.push_url(&mut writer, &format!("{}{}", base_url, page.path),
                          &today, page.change_freq, page.priority)?;
        }

        for post in posts {
            let loc = format!("{}/blog/{}/", base_url, post.slug);
            self.push_url(&mut writer, &loc, &format_date(&post.date), "monthly", "0.7")?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(writer.into_inner().into_inner())
    }

    fn push_url(&self, writer: &mut Writer<Cursor<Vec<u8>>>, loc: &str, last_mod: &str,
                change_freq: &str, priority: &str) -> quick_xml::Result<()> {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        push_text(writer, "loc", loc)?;
        push_text(writer, "lastmod", last_mod)?;
        push_text(writer, "changefreq", change_freq)?;
        push_text(writer, "priority", priority)?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
        Ok(())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::test_data::POST_MORPHO_1;

    use super::*;

    #[test]
    fn render_sitemap() {
        let posts = vec![Post::from_string("morpho-internals-part-1", POST_MORPHO_1).unwrap()];
        let static_pages = [
            StaticPage { path: "/", change_freq: "weekly", priority: "1.0" },
            StaticPage { path: "/blog", change_freq: "weekly", priority: "0.8" },
            StaticPage { path: "/about", change_freq: "monthly", priority: "0.7" },
        ];

        let sitemap = Sitemap { base_url: "https://taichiaudit.com/" };
        let xml = sitemap.render(&static_pages, &posts).unwrap();
        let xml = str::from_utf8(&xml).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://taichiaudit.com/</loc>"));
        assert!(xml.contains("<loc>https://taichiaudit.com/blog</loc>"));
        assert!(xml.contains("<loc>https://taichiaudit.com/blog/morpho-internals-part-1/</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(xml.ends_with("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), 4);
    }
}
