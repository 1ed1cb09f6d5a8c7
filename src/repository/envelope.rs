//! Response envelopes of the clinic API.
//!
//! List endpoints answer with `{data: [...], links, meta}`, single-resource
//! endpoints with `{data: {...}}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Links {
    pub first: Option<String>,
    pub last: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
    #[serde(default)]
    pub from: Option<usize>,
    #[serde(default)]
    pub to: Option<usize>,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
            from: None,
            to: None,
        }
    }
}

impl PageMeta {
    /// Metadata for an unpaginated response holding `len` items.
    pub fn single_page(len: usize) -> Self {
        Self {
            per_page: len,
            total: len,
            from: (len > 0).then_some(1),
            to: (len > 0).then_some(len),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> ListEnvelope<T> {
    /// Splits the envelope into items and metadata, synthesizing the latter
    /// when the endpoint is not paginated.
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        let meta = self
            .meta
            .unwrap_or_else(|| PageMeta::single_page(self.data.len()));
        (self.data, meta)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}
