use std::path::PathBuf;
use std::{fs, io};

use spdlog::{error, warn};

use crate::post::Post;

/// Filesystem-backed post store. Every call re-reads and re-parses the
/// content directory, so results always reflect whatever is on disk at the
/// moment of the request. There is no shared mutable state.
pub struct PostStore {
    posts_dir: PathBuf,
}

impl PostStore {
    pub fn new(posts_dir: PathBuf) -> Self {
        PostStore { posts_dir }
    }

    /// All parseable posts, newest first. Files that fail to parse are logged
    /// and skipped; an unreadable directory degrades to an empty list.
    pub fn all_posts(&self) -> Vec<Post> {
        let entries = match fs::read_dir(&self.posts_dir) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error reading posts directory {:?}: {}", self.posts_dir, e);
                return vec![];
            }
        };

        let mut posts = vec![];
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(slug) = md_slug(&path) else {
                continue;
            };

            match Post::from_file(&slug, &path) {
                Ok(post) => posts.push(post),
                Err(e) => warn!("Skipping post {:?}: {}", path, e),
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Reads exactly `{slug}.md`. Missing and malformed files both come back
    /// as `None`, which the page layer turns into a 404.
    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        let path = self.posts_dir.join(format!("{}.md", slug));
        match Post::from_file(slug, &path) {
            Ok(post) => Some(post),
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Error reading post {}: {}", slug, e);
                }
                None
            }
        }
    }

    /// Distinct categories, alphabetical.
    pub fn all_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.all_posts()
            .into_iter()
            .map(|post| post.category)
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Distinct tags, alphabetical.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.all_posts()
            .into_iter()
            .flat_map(|post| post.tags)
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    pub fn posts_by_category(&self, category: &str) -> Vec<Post> {
        let category = category.to_lowercase();
        self.all_posts()
            .into_iter()
            .filter(|post| post.category.to_lowercase() == category)
            .collect()
    }

    pub fn posts_by_tag(&self, tag: &str) -> Vec<Post> {
        let tag = tag.to_lowercase();
        self.all_posts()
            .into_iter()
            .filter(|post| post.tags.iter().any(|t| t.to_lowercase() == tag))
            .collect()
    }

    pub fn featured_posts(&self) -> Vec<Post> {
        self.all_posts()
            .into_iter()
            .filter(|post| post.featured)
            .collect()
    }
}

fn md_slug(path: &PathBuf) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let slug = file_name.strip_suffix(".md")?;
    if path.is_file() {
        Some(slug.to_string())
    } else {
        None
    }
}
