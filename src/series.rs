use lazy_static::lazy_static;
use regex::Regex;

use crate::config::{PartSource, SeriesDef};
use crate::post::Post;

/// Posts without an extractable part number sort after every numbered part.
const UNNUMBERED: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLink {
    pub slug: String,
    pub title: String,
}

/// Chapter-style navigation for a post inside a series. Series membership is
/// purely a slug naming convention, re-derived on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesNav {
    pub series_name: String,
    pub hub_url: String,
    pub prev: Option<SeriesLink>,
    pub next: Option<SeriesLink>,
    pub current_part: usize,
    pub total_parts: usize,
}

fn part_number(def: &SeriesDef, post: &Post) -> u32 {
    lazy_static! {
        static ref TITLE_PART_REGEX: Regex = Regex::new(r"(?i)part\s*(?P<part>\d+)").unwrap();
        static ref SLUG_PART_REGEX: Regex = Regex::new(r"-(?P<part>\d+)$").unwrap();
    }

    let captures = match def.part_from {
        PartSource::Title => TITLE_PART_REGEX.captures(&post.title),
        PartSource::Slug => SLUG_PART_REGEX.captures(&post.slug),
    };

    captures
        .and_then(|cap| cap.name("part"))
        .and_then(|part| part.as_str().parse().ok())
        .unwrap_or(UNNUMBERED)
}

pub fn find_series<'a>(defs: &'a [SeriesDef], slug: &str) -> Option<&'a SeriesDef> {
    defs.iter().find(|def| slug.starts_with(def.prefix.as_str()))
}

/// Members of a series in part order, derived from `all_posts`.
pub fn series_posts(def: &SeriesDef, all_posts: &[Post]) -> Vec<Post> {
    let mut members: Vec<Post> = all_posts.iter()
        .filter(|post| post.slug.starts_with(def.prefix.as_str()))
        .cloned()
        .collect();
    members.sort_by_key(|post| part_number(def, post));
    members
}

/// Prev/next navigation for `post` within its series, or `None` for a
/// standalone post. First matching prefix definition wins.
pub fn series_nav(post: &Post, all_posts: &[Post], defs: &[SeriesDef]) -> Option<SeriesNav> {
    let def = find_series(defs, &post.slug)?;

    let members = series_posts(def, all_posts);
    let idx = members.iter().position(|p| p.slug == post.slug)?;

    let link = |p: &Post| SeriesLink { slug: p.slug.clone(), title: p.title.clone() };

    Some(SeriesNav {
        series_name: def.name.clone(),
        hub_url: def.hub_url.clone(),
        prev: idx.checked_sub(1).map(|i| link(&members[i])),
        next: members.get(idx + 1).map(link),
        current_part: idx + 1,
        total_parts: members.len(),
    })
}
