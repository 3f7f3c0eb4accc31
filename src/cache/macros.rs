/// A macro to simplify get-or-fetch caching.
///
/// Checks the cache for `$key`. On a hit the cached value is returned.
/// On a miss the future `$block` is awaited; a successful value is inserted
/// into the cache and returned, an error is propagated and nothing is stored.
///
/// # Arguments
/// * `$cache`: The cache to use. Must have async `get` and `insert` methods.
/// * `$key`: The key to look up and store under.
/// * `$block`: A future producing `AppResult<V>`, awaited only on a miss.
///
/// # Example
/// ```rust,ignore
/// let record = cached!(self.cache, movie_id, async move {
///     provider.fetch_movie(movie_id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get(&$key).await {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.insert($key, value.clone()).await;
            Ok(value)
        }
    }};
}
