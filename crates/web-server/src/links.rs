//! Hypermedia links attached to every `Imovel` the API returns.

use core_types::Imovel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub update: Link,
    pub delete: Link,
    /// Only present on single-record responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<Link>,
}

/// An `Imovel` with its `_links` object, serialized as one flat JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct ImovelResource {
    #[serde(flatten)]
    pub imovel: Imovel,
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Builds absolute link URLs from the configured public base URL.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    pub fn new(public_url: &str) -> Self {
        Self {
            base_url: public_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_href(&self) -> String {
        format!("{}/imoveis", self.base_url)
    }

    pub fn item_href(&self, id: i64) -> String {
        format!("{}/imoveis/{}", self.base_url, id)
    }

    fn links(&self, id: i64, with_all: bool) -> Links {
        let href = self.item_href(id);
        Links {
            self_link: Link { href: href.clone(), method: "GET" },
            update: Link { href: href.clone(), method: "PUT" },
            delete: Link { href, method: "DELETE" },
            all: with_all.then(|| Link {
                href: self.collection_href(),
                method: "GET",
            }),
        }
    }

    /// Wraps a record that is returned inside a list or filter response.
    pub fn listed(&self, imovel: Imovel) -> ImovelResource {
        let links = self.links(imovel.id, false);
        ImovelResource { imovel, links }
    }

    /// Wraps a record that is returned on its own; adds the `all` link.
    pub fn single(&self, imovel: Imovel) -> ImovelResource {
        let links = self.links(imovel.id, true);
        ImovelResource { imovel, links }
    }
}
