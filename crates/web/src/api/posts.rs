use axum::{
    extract::{Query, State},
    Json,
};
use model::post::PostMarker;
use serde::Deserialize;
use utility::{geo::PHILIPPINES, serde::flag};

use crate::WebState;

#[derive(Debug, Deserialize)]
pub(crate) struct PostsQuery {
    #[serde(deserialize_with = "flag::deserialize_lenient", default)]
    in_ph: bool,
}

/// Stored posts, or the configured fallback posts if there are none or the
/// database cannot be queried. `in_ph` limits both to the Philippines.
pub(crate) async fn posts(
    State(WebState { client, config }): State<WebState>,
    Query(params): Query<PostsQuery>,
) -> Json<Vec<PostMarker>> {
    let bounding_box = params.in_ph.then_some(PHILIPPINES);

    match client.get_posts(bounding_box).await {
        Ok(posts) if !posts.is_empty() => {
            return Json(posts.into_iter().map(PostMarker::from).collect());
        }
        Ok(_) => log::info!("no stored posts, serving fallback posts"),
        Err(why) => log::warn!("could not query posts, serving fallback posts: {}", why),
    }

    Json(
        config
            .fallback_posts
            .iter()
            .filter(|post| {
                bounding_box
                    .as_ref()
                    .map_or(true, |bounding_box| post.is_within(bounding_box))
            })
            .cloned()
            .collect(),
    )
}
