//! Summary statistics over a blog collection.
//!
//! Pure reductions over an ordered slice of posts. All author-level statistics
//! come from one grouping pass over the slice that keeps authors in the
//! order they are first seen.
//!
//! Tie-break: whenever two candidates share the maximum, the one that comes
//! first in input order wins (first post for [`favorite_post`], first-seen
//! author for [`most_prolific_author`] / [`most_liked_author`]).
//!
//! Like sums saturate at `i64::MAX` instead of overflowing.

use std::collections::HashMap;

use serde::Serialize;

use crate::repos::BlogPost;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorPostCount {
    pub author: String,
    pub post_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub total_likes: i64,
}

/// Every statistic at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogStats<'a> {
    pub total_likes: i64,
    pub favorite: Option<&'a BlogPost>,
    pub most_prolific_author: Option<AuthorPostCount>,
    pub most_liked_author: Option<AuthorLikes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AuthorTally<'a> {
    author: &'a str,
    posts: usize,
    likes: i64,
}

pub fn total_likes(posts: &[BlogPost]) -> i64 {
    posts.iter().fold(0, |acc: i64, p| acc.saturating_add(p.likes))
}

pub fn favorite_post(posts: &[BlogPost]) -> Option<&BlogPost> {
    first_max_by_key(posts, |p| p.likes)
}

pub fn most_prolific_author(posts: &[BlogPost]) -> Option<AuthorPostCount> {
    prolific(&tally_by_author(posts))
}

pub fn most_liked_author(posts: &[BlogPost]) -> Option<AuthorLikes> {
    liked(&tally_by_author(posts))
}

pub fn summarize(posts: &[BlogPost]) -> BlogStats<'_> {
    let tallies = tally_by_author(posts);

    BlogStats {
        total_likes: total_likes(posts),
        favorite: favorite_post(posts),
        most_prolific_author: prolific(&tallies),
        most_liked_author: liked(&tallies),
    }
}

fn prolific(tallies: &[AuthorTally<'_>]) -> Option<AuthorPostCount> {
    first_max_by_key(tallies, |t| t.posts).map(|t| AuthorPostCount {
        author: t.author.to_string(),
        post_count: t.posts,
    })
}

fn liked(tallies: &[AuthorTally<'_>]) -> Option<AuthorLikes> {
    first_max_by_key(tallies, |t| t.likes).map(|t| AuthorLikes {
        author: t.author.to_string(),
        total_likes: t.likes,
    })
}

// Exact string match on `author`; output order is first-seen order.
fn tally_by_author(posts: &[BlogPost]) -> Vec<AuthorTally<'_>> {
    let mut tallies: Vec<AuthorTally<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for post in posts {
        match index.get(post.author.as_str()) {
            Some(&i) => {
                let tally = &mut tallies[i];
                tally.posts += 1;
                tally.likes = tally.likes.saturating_add(post.likes);
            }
            None => {
                index.insert(post.author.as_str(), tallies.len());
                tallies.push(AuthorTally {
                    author: &post.author,
                    posts: 1,
                    likes: post.likes,
                });
            }
        }
    }

    tallies
}

// `Iterator::max_by_key` returns the *last* maximum; this keeps the first one.
fn first_max_by_key<T, K, F>(items: &[T], key: F) -> Option<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items
        .iter()
        .reduce(|best, item| if key(item) > key(best) { item } else { best })
}
