//! Route manifest assembly.
//!
//! Uncategorized pages come first. Categories follow in the order their first
//! page was met during the walk; each is introduced by one header record.
//! Within a group pages sort by frontmatter `order` (unordered last), then by
//! source path.

use quire_assets::{RouteDescriptor, RouteManifest};

use crate::page::Page;

/// Build the manifest for `pages`, given in walk order.
pub(crate) fn build_manifest(pages: &[Page]) -> RouteManifest {
    let mut uncategorized: Vec<&Page> = Vec::new();
    let mut categories: Vec<(&str, Vec<&Page>)> = Vec::new();

    for page in pages {
        match page.category.as_deref() {
            None => uncategorized.push(page),
            Some(category) => match categories.iter_mut().find(|(name, _)| *name == category) {
                Some((_, members)) => members.push(page),
                None => categories.push((category, vec![page])),
            },
        }
    }

    let mut routes = Vec::with_capacity(pages.len() + categories.len());
    sort_group(&mut uncategorized);
    routes.extend(uncategorized.into_iter().map(descriptor));

    for (category, mut members) in categories {
        sort_group(&mut members);
        routes.push(RouteDescriptor::header(category));
        routes.extend(members.into_iter().map(descriptor));
    }

    RouteManifest::new(routes)
}

fn sort_group(pages: &mut [&Page]) {
    pages.sort_by(|a, b| {
        (a.order.is_none(), a.order, &a.source).cmp(&(b.order.is_none(), b.order, &b.source))
    });
}

fn descriptor(page: &Page) -> RouteDescriptor {
    RouteDescriptor::route(
        page.id.clone(),
        page.title.clone(),
        page.category.clone(),
        page.order,
    )
}
