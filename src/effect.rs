//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one listing page and every listed record's detail
    FetchPage { offset: u32, limit: u32 },
    /// Fetch the type names for the filter selector
    FetchTypes,
    /// Fetch and decode one record's sprite
    FetchSprite { id: u16, url: String },
}
