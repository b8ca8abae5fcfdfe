use crate::error::Result;
use crate::index::resolve_index;
use crate::model::Snippet;

/// Removes the snippet at `token`; later snippets move down by one.
/// Returns the removed position and snippet.
pub fn run(snippets: &mut Vec<Snippet>, token: Option<&str>) -> Result<(usize, Snippet)> {
    let index = resolve_index(token, snippets.len())?;
    let removed = snippets.remove(index);
    Ok((index, removed))
}
