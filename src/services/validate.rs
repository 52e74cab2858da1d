use crate::models::book::BookInformation;

/// Which fields a candidate must carry to be returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Completeness {
    #[default]
    Basic,
    /// Basic rule plus a non-empty category list.
    WithCategories,
}

pub fn is_complete(info: &BookInformation, rule: Completeness) -> bool {
    let basic = !info.title.is_empty()
        && !info.description.is_empty()
        && !info.authors.is_empty()
        && info.page_count > 0
        && !info.image_links.small_thumbnail.is_empty()
        && !info.image_links.thumbnail.is_empty();

    match rule {
        Completeness::Basic => basic,
        Completeness::WithCategories => basic && !info.categories.is_empty(),
    }
}
