//! Turns `links` arrays into named accessors.

use std::collections::BTreeMap;

use super::Accessor;
use crate::types::Link;

/// Binds a `links` array into accessors keyed by `rel`.
///
/// Links sharing a rel are grouped, keeping their relative order. `tags`
/// and `backups` get their special accessors; every other rel becomes an
/// [`Accessor::Link`] over all of its hrefs. Links without an href are
/// skipped.
///
/// ```rust
/// use right_api::{Accessor, Link, bind_links};
///
/// let bound = bind_links(&[
///     Link::new("inputs", "/api/servers/1/inputs"),
///     Link::new("tags", "/api/tags"),
///     Link::new("inputs", "/api/servers/2/inputs"),
/// ]);
/// assert_eq!(
///     bound["inputs"].hrefs(),
///     vec!["/api/servers/1/inputs", "/api/servers/2/inputs"]
/// );
/// assert_eq!(bound["tags"], Accessor::Tags { href: "/api/tags".into() });
/// ```
pub fn bind_links(links: &[Link]) -> BTreeMap<String, Accessor> {
    let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for link in links {
        if let Some(href) = link.href() {
            grouped
                .entry(link.rel.as_str())
                .or_default()
                .push(href.to_string());
        }
    }

    grouped
        .into_iter()
        .map(|(rel, mut hrefs)| {
            let accessor = match rel {
                "tags" => Accessor::Tags {
                    href: hrefs.swap_remove(0),
                },
                "backups" => Accessor::Backups {
                    href: hrefs.swap_remove(0),
                },
                _ => Accessor::Link { hrefs },
            };
            (rel.to_string(), accessor)
        })
        .collect()
}
