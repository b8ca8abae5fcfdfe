use crate::error::Result;
use crate::index::resolve_index;
use crate::model::Snippet;

pub fn run<'a>(snippets: &'a [Snippet], token: Option<&str>) -> Result<&'a Snippet> {
    let index = resolve_index(token, snippets.len())?;
    Ok(&snippets[index])
}
