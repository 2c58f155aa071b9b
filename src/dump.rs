//! Formatting of the feature details shown in the popup.
//!
//! The details come back as text in which OSM objects are mentioned as
//! `Node 123`, `Way 456` or `Relation 789`. When a browse URL is configured
//! those mentions become links.

const OSM_TYPES: [(&str, &str); 3] = [("Node", "node"), ("Way", "way"), ("Relation", "relation")];

/// Replace `<Type> <digits>` mentions with links to `browse_url`
fn link_objects(text: &str, browse_url: &str) -> String {
    let browse_url = quick_xml::escape::escape(browse_url);
    let mut result = text.to_string();

    for (label, kind) in OSM_TYPES {
        let prefix = format!("{label} ");
        let mut linked = String::with_capacity(result.len());
        let mut rest = result.as_str();

        while let Some(pos) = rest.find(&prefix) {
            let after = &rest[pos + prefix.len()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();

            linked.push_str(&rest[..pos + prefix.len()]);

            if digits > 0 {
                let id = &after[..digits];
                linked.push_str(&format!("<a href='{browse_url}/{kind}/{id}' target='{kind}{id}'>{id}</a>"));
            }

            rest = &after[digits..];
        }

        linked.push_str(rest);
        result = linked;
    }

    result
}

/// Turn a details response into popup HTML: object mentions linked when
/// `browse_url` is given, and line breaks as `<br>`.
#[must_use]
pub fn format_details(text: &str, browse_url: Option<&str>) -> String {
    let text = match browse_url {
        Some(url) => link_objects(text, url),
        None => text.to_string(),
    };

    text.split('\n').collect::<Vec<_>>().join("<br>")
}

/// Statistics text wrapped for display
#[must_use]
pub fn format_statistics(text: &str) -> String {
    format!("<pre>{}</pre>", quick_xml::escape::escape(text))
}
