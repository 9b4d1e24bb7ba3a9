use crate::post::Post;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Scores every candidate against the reference post and returns the top
/// `limit`, reference excluded. Zero-score posts are ranked, not filtered, so
/// the slots fill up even when nothing genuinely overlaps. `sort_by` is
/// stable, equal scores keep their incoming order.
pub fn related_posts(reference: &Post, posts: &[Post], limit: usize) -> Vec<Post> {
    let mut scored: Vec<(u32, &Post)> = posts.iter()
        .filter(|post| post.slug != reference.slug)
        .map(|post| (score(reference, post), post))
        .collect();

    scored.sort_by(|(score_a, _), (score_b, _)| score_b.cmp(score_a));

    scored.into_iter()
        .take(limit)
        .map(|(_, post)| post.clone())
        .collect()
}

fn score(reference: &Post, candidate: &Post) -> u32 {
    let mut score = 0;

    // Same category gets +2, exact match
    if candidate.category == reference.category {
        score += 2;
    }

    // Each shared tag gets +1
    let shared_tags = candidate.tags.iter()
        .filter(|tag| reference.tags.contains(tag))
        .count();
    score += shared_tags as u32;

    score
}
