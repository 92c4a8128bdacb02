//! Template engine, Markdown converter and CSS inliner implementations

mod css;
mod handlebars;
mod markdown;

pub use self::{
    css::CssInliner,
    handlebars::{HandlebarsEngine, HandlebarsTemplate},
    markdown::MarkdownConverter,
};
