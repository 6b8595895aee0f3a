/// Skip the first `offset` items and take at most `limit` of the rest.
/// Out-of-range offsets give an empty window.
pub fn window<T>(items: &[T], offset: usize, limit: usize) -> &[T] {
    let start = offset.min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    &items[start..end]
}
