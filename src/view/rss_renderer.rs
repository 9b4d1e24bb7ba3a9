use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::Post;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>Taichi Audit Blog</title>
  <link>https://taichiaudit.com</link>
  <description>Security research, DeFi deep-dives, and audit engineering.</description>
  <item>
    <title>Morpho Internals Part 1: The Singleton</title>
    <link>https://taichiaudit.com/blog/morpho-internals-part-1/</link>
    <description>How Morpho Blue packs a lending protocol into one contract.</description>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;
        push_text(&mut writer, "language", "en")?;

        let now = Utc::now();
        push_text(&mut writer, "lastBuildDate", &now.to_rfc2822())?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", post.title.as_str())?;

            let link = full_link(self.ch_link, post.slug.as_str());
            push_text(&mut writer, "link", link.as_str())?;

            // The permalink doubles as the guid
            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(link.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", post.excerpt.as_str())?;

            let midnight = post.date.and_hms_opt(0, 0, 0).unwrap();
            let pub_date = Utc.from_utc_datetime(&midnight);
            push_text(&mut writer, "pubDate", &pub_date.to_rfc2822())?;

            push_text(&mut writer, "category", post.category.as_str())?;
            push_text(&mut writer, "author", post.author.as_str())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, slug: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    format!("{}/blog/{}/", base_url, slug)
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::test_data::{POST_MORPHO_1, POST_SOLANA_1};

    use super::*;

    #[test]
    fn render_xml() {
        let posts = vec![
            Post::from_string("solana-security-series-1", POST_SOLANA_1).unwrap(),
            Post::from_string("morpho-internals-part-1", POST_MORPHO_1).unwrap(),
        ];

        let rss = RssChannel {
            ch_title: "Taichi Audit Blog",
            ch_link: "https://taichiaudit.com",
            ch_desc: "Security research and audit engineering",
        };
        let xml = rss.render(&posts).unwrap();
        let xml = str::from_utf8(&xml).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel>"#));
        assert!(xml.contains("<title>Taichi Audit Blog</title>"));
        assert!(xml.contains("<link>https://taichiaudit.com/blog/morpho-internals-part-1/</link>"));
        assert!(xml.contains(r#"<guid isPermaLink="true">https://taichiaudit.com/blog/solana-security-series-1/</guid>"#));
        assert!(xml.contains("<![CDATA[How Morpho Blue packs a lending protocol into one contract.]]>"));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<category>Solana Security</category>"));
        assert!(xml.ends_with("</channel></rss>"));
        assert_eq!(xml.matches("<item>").count(), 2);
    }

    #[test]
    fn render_empty_feed() {
        let rss = RssChannel {
            ch_title: "t",
            ch_link: "https://taichiaudit.com/",
            ch_desc: "d",
        };
        let xml = rss.render(&[]).unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(!xml.contains("<item>"));
        assert!(xml.contains("<language>en</language>"));
    }

    #[test]
    fn test_full_link_slash_handling() {
        assert_eq!(full_link("https://x.com", "a"), "https://x.com/blog/a/");
        assert_eq!(full_link("https://x.com/", "a"), "https://x.com/blog/a/");
    }
}
