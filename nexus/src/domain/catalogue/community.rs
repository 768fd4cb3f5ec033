//! Communities members can join.

use serde::{Deserialize, Serialize};

use super::CatalogueRecord;

/// A community listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Stable identifier.
    pub id: String,
    /// Community name, searchable.
    pub name: String,
    /// Description, searchable.
    pub description: String,
    /// One of `institute`, `field`, `interest`, `diversity`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Topic tags.
    pub categories: Vec<String>,
    /// Member count.
    pub members: u32,
    /// Open to anyone without approval.
    pub is_public: bool,
    /// Owning institute for institute communities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institute_id: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Banner URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl Community {
    /// Community type options in switcher order.
    pub const KINDS: [&'static str; 4] = ["institute", "field", "interest", "diversity"];
}

/// Facets on the communities page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommunityFacet {
    /// Community type.
    Kind,
}

impl CatalogueRecord for Community {
    type Facet = CommunityFacet;

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn facet_value(&self, facet: CommunityFacet) -> &str {
        match facet {
            CommunityFacet::Kind => &self.kind,
        }
    }
}
