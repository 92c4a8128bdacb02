//! CSS inlining

use std::borrow::Cow;

use css_inline::CSSInliner;
use tracing::debug;

use crate::domain::rendering::{InliningError, StyleInliner};

/// Inlines `<style>` blocks and an optional extra stylesheet with
/// `css-inline`. Remote stylesheets are never fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssInliner;

impl StyleInliner for CssInliner {
    fn inline(&self, html: &str, stylesheet: &str) -> Result<String, InliningError> {
        let extra_css = (!stylesheet.trim().is_empty()).then(|| Cow::Borrowed(stylesheet));

        let inliner = CSSInliner::options()
            .load_remote_stylesheets(false)
            .extra_css(extra_css)
            .build();

        inliner.inline(html).map_err(|e| {
            debug!("InlineError -> InliningError");

            InliningError(e.to_string())
        })
    }
}
