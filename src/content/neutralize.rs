//! Resource neutralization.
//!
//! Every attribute that would make a browser-backed DOM fetch something is
//! replaced by an inert placeholder. The original URL is kept next to it
//! (`data-original-src`, `data-original-href`, or a CSS comment) so that the
//! image and link collectors still see real addresses.

use regex::Captures;

use crate::patterns::{
    BACKGROUND_IMAGE, CSS_IMPORT, IMG_SRC, LINK_HREF, PLACEHOLDER_IMAGE, REL_ATTR, SCRIPT_SRC,
    STYLE_ATTR, STYLE_BLOCK,
};

/// `rel` values whose `href` is page metadata rather than a loadable resource.
const METADATA_RELS: &[&str] = &["canonical", "icon", "alternate", "next", "prev"];

/// Replace loadable resource references in raw markup.
#[must_use]
pub fn neutralize_resources(html: &str) -> String {
    let html = IMG_SRC.replace_all(html, |caps: &Captures| {
        format!(
            r#"<img{} src="{PLACEHOLDER_IMAGE}" data-original-src="{}"{}>"#,
            &caps[1], &caps[2], &caps[3]
        )
    });

    let html = LINK_HREF.replace_all(&html, |caps: &Captures| {
        let rel = REL_ATTR
            .captures(&caps[1])
            .or_else(|| REL_ATTR.captures(&caps[3]))
            .map(|c| c[1].to_lowercase())
            .unwrap_or_default();

        if METADATA_RELS.iter().any(|keep| rel.contains(keep)) {
            caps[0].to_string()
        } else {
            format!(
                r#"<link{} href="about:blank" data-original-href="{}"{}>"#,
                &caps[1], &caps[2], &caps[3]
            )
        }
    });

    let html = SCRIPT_SRC.replace_all(&html, |caps: &Captures| {
        format!(r#"<script{} data-original-src="{}"{}>"#, &caps[1], &caps[2], &caps[3])
    });

    let html = STYLE_BLOCK.replace_all(&html, |caps: &Captures| {
        format!("{}{}{}", &caps[1], neutralize_css(&caps[2]), &caps[3])
    });

    STYLE_ATTR
        .replace_all(&html, |caps: &Captures| {
            format!("{}{}", &caps[1], neutralize_css(&caps[2]))
        })
        .into_owned()
}

/// Disable imports and background images in a CSS fragment.
fn neutralize_css(css: &str) -> String {
    let css = CSS_IMPORT.replace_all(css, |caps: &Captures| {
        format!("/* @import disabled: {} */", &caps[1])
    });

    BACKGROUND_IMAGE
        .replace_all(&css, |caps: &Captures| {
            format!(
                "background-image:url({PLACEHOLDER_IMAGE}) /* original: {} */",
                &caps[1]
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_source_is_replaced_and_preserved() {
        let out = neutralize_resources(r#"<img class="a" src="/may-tinh.jpg" alt="Máy tính">"#);

        assert!(out.contains(PLACEHOLDER_IMAGE));
        assert!(out.contains(r#"data-original-src="/may-tinh.jpg""#));
        assert!(out.contains(r#"alt="Máy tính""#));
        assert!(!out.contains(r#" src="/may-tinh.jpg""#));
    }

    #[test]
    fn test_stylesheet_is_blanked_but_canonical_kept() {
        let out = neutralize_resources(
            r#"<link rel="stylesheet" href="/site.css"><link rel="canonical" href="https://example.vn/a">"#,
        );

        assert!(out.contains(r#"href="about:blank" data-original-href="/site.css""#));
        assert!(out.contains(r#"<link rel="canonical" href="https://example.vn/a">"#));
    }

    #[test]
    fn test_hreflang_alternate_kept() {
        let html = r#"<link rel="alternate" hreflang="vi" href="https://example.vn/vi/">"#;
        assert_eq!(neutralize_resources(html), html);
    }

    #[test]
    fn test_script_source_removed() {
        let out = neutralize_resources(r#"<script async src="https://cdn.example/app.js"></script>"#);
        assert_eq!(
            out,
            r#"<script async data-original-src="https://cdn.example/app.js"></script>"#
        );
    }

    #[test]
    fn test_css_import_and_background_disabled() {
        let out = neutralize_resources(
            r#"<style>@import "theme.css";</style><div style="background-image: url('hero.png')">x</div>"#,
        );

        assert!(out.contains("/* @import disabled: theme.css */"));
        assert!(out.contains("/* original: hero.png */"));
        assert!(!out.contains("url('hero.png')"));
    }

    #[test]
    fn test_css_in_prose_is_left_alone() {
        let html = "<p>Thêm @import url(theme.css) và background-image: url(nen.png) vào tệp CSS.</p>";
        assert_eq!(neutralize_resources(html), html);
    }
}
