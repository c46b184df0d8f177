// Random article selection and output rendering.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::raindrop::Article;

/// Printed when there is nothing to pick from.
pub const NO_ARTICLES: &str = "No articles found";

/// Choose one article uniformly at random.
pub fn pick_random<'a, R: Rng + ?Sized>(
    articles: &'a [Article],
    rng: &mut R,
) -> Option<&'a Article> {
    articles.choose(rng)
}

/// The line written to stdout for a pick.
pub fn render(article: Option<&Article>) -> String {
    match article {
        Some(article) => article.url.clone(),
        None => NO_ARTICLES.to_string(),
    }
}
