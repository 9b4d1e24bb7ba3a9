use std::fmt;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::text_utils::parse_date;

/// One markdown file in the content directory. The slug is the file stem and
/// is the addressing key everywhere; the body stays raw markdown until a view
/// hands it to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub date: NaiveDate,
    pub read_time: String,
    pub category: String,
    pub tags: Vec<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub body: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, category={}\ntitle={}",
               self.slug,
               self.date,
               self.author,
               self.category,
               self.title,
        )
    }
}

/// Raw front-matter block. Every field is optional; display defaults are
/// applied when materializing the `Post`. Unknown keys are ignored.
#[derive(Deserialize, Default)]
struct FrontMatter {
    title: Option<String>,
    excerpt: Option<String>,
    author: Option<String>,
    date: Option<String>,
    #[serde(rename = "readTime")]
    read_time: Option<String>,
    category: Option<String>,
    tags: Option<Vec<String>>,
    featured: Option<bool>,
    image: Option<String>,
}

/// Example of a post file:
///
/// ---
/// title: "Morpho Internals Part 1: The Singleton"
/// date: "2024-01-15"
/// category: "DeFi Security"
/// tags: ["morpho", "lending"]
/// ---
///
/// Body markdown...
impl Post {
    pub fn from_file(slug: &str, file_path: &Path) -> io::Result<Post> {
        let raw = fs::read_to_string(file_path)?;
        Self::from_string(slug, &raw)
    }

    pub fn from_string(slug: &str, raw: &str) -> io::Result<Post> {
        let (front, body) = match split_front_matter(raw) {
            Some((block, body)) => {
                let front = serde_yaml::from_str::<FrontMatter>(block).map_err(|e| {
                    io::Error::new(ErrorKind::InvalidData, format!("Invalid front matter in {}: {}", slug, e))
                })?;
                (front, body)
            }
            // No front-matter block: the whole file is body, metadata defaults
            None => (FrontMatter::default(), raw),
        };

        let date = match front.date {
            Some(ref date_str) => parse_date(date_str).map_err(|e| {
                io::Error::new(ErrorKind::InvalidData, format!("{} - post={}", e, slug))
            })?,
            None => Utc::now().date_naive(),
        };

        Ok(Post {
            slug: slug.to_string(),
            title: front.title.unwrap_or_default(),
            excerpt: front.excerpt.unwrap_or_default(),
            author: front.author.unwrap_or_else(|| "Anonymous".to_string()),
            date,
            read_time: front.read_time.unwrap_or_else(|| "5 min read".to_string()),
            category: front.category.unwrap_or_else(|| "General".to_string()),
            tags: front.tags.unwrap_or_default(),
            featured: front.featured.unwrap_or(false),
            image: front.image,
            body: body.to_string(),
        })
    }
}

/// Splits a leading `---` delimited block from the body. Returns `None` when
/// the file does not open with a block, so callers can fall back to defaults.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    let end = rest.find("\n---")?;
    let block = &rest[..end];

    let body = &rest[end + 4..];
    let body = body.strip_prefix('\r').unwrap_or(body);
    let body = body.strip_prefix('\n').unwrap_or(body);

    Some((block, body))
}
