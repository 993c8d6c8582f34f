//! List posts.

use anyhow::Result;
use apicheck_core::{verify, Post, PostsEndpoint, POSTS_PATH};
use console::style;
use std::path::Path;

/// Print posts, optionally limited or filtered by id.
pub async fn run(
    config_path: &Path,
    base_url: Option<&str>,
    limit: Option<usize>,
    ids: &[u64],
) -> Result<()> {
    let config = super::load_config(config_path, base_url)?;
    let client = super::client(&config)?;
    let posts = PostsEndpoint::new(&client);

    let resp = match (limit, ids.is_empty()) {
        (_, false) => posts.list_by_ids(ids).await?,
        (Some(n), true) => posts.list_limited(n).await?,
        (None, true) => posts.list_all().await?,
    };
    verify::expect_status(&resp, 200, POSTS_PATH)?;

    let mut listed: Vec<Post> = resp.json()?;
    // `_limit` is ignored when filtering by id
    if let (Some(n), false) = (limit, ids.is_empty()) {
        listed.truncate(n);
    }

    for post in &listed {
        println!(
            "{:>6}  {}  {}",
            style(post.id).cyan(),
            style(format!("user {}", post.user_id)).dim(),
            post.title
        );
    }
    println!();
    println!("{} posts", listed.len());
    Ok(())
}
