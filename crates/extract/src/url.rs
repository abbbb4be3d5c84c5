use url::Url;

/// Resolve `href` against `base`. Without a base, or when resolution fails, `href` comes back
/// unchanged.
pub(crate) fn resolve_relative_url(base: Option<&Url>, href: &str) -> String {
    let Some(base) = base else {
        return href.to_string();
    };
    match base.join(href) {
        Ok(resolved) => resolved.into(),
        Err(err) => {
            log::debug!(target: "extract.metadata", "cannot resolve {href:?} against {base}: {err}");
            href.to_string()
        }
    }
}
