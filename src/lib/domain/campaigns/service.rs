//! Campaign service: loads campaigns and renders per-recipient messages

use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use crate::domain::{
    communication::mailer::RenderedMessage,
    rendering::{
        LayoutComposer, MarkupConverter, RenderContext, RenderError, StyleInliner, TemplateEngine,
    },
    storage::Storage,
};

use super::{
    errors::{LoadCampaignError, RenderMessageError},
    Campaign, CampaignConfig, RecipientLoader, TemplateLoader,
};

/// HTML layout used when the layout directory has none
pub const DEFAULT_HTML_LAYOUT: &str = "<html><body>{{Content}}</body></html>";

/// Parsers for the campaign's input documents
#[derive(Debug, Clone)]
pub struct Loaders {
    /// Splits template files into metadata and body
    pub templates: Arc<dyn TemplateLoader>,

    /// Parses recipient list files
    pub recipients: Arc<dyn RecipientLoader>,
}

/// The HTML-only stages of the pipeline
#[derive(Debug, Clone)]
pub struct HtmlPipeline {
    /// Converts the rendered body to HTML
    pub converter: Arc<dyn MarkupConverter>,

    /// Inlines styles into the composed document
    pub inliner: Arc<dyn StyleInliner>,
}

/// A step of the per-recipient pipeline, reported on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// Variable substitution into the body template
    Body,

    /// Wrapping the body in the plain-text layout
    PlainLayout,

    /// Converting the body to HTML
    Markdown,

    /// Wrapping the HTML body in the HTML layout
    HtmlLayout,

    /// Inlining styles into the HTML document
    Inlining,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Body => "body template",
            Self::PlainLayout => "plain layout",
            Self::Markdown => "markdown conversion",
            Self::HtmlLayout => "HTML layout",
            Self::Inlining => "style inlining",
        };

        f.write_str(stage)
    }
}

/// Loads campaigns and renders their messages.
///
/// Rendering only reads from the service and the campaign, so distinct
/// recipients can be rendered from several threads at once.
#[derive(Debug)]
pub struct CampaignService<S, E> {
    config: CampaignConfig,
    storage: Arc<S>,
    engine: Arc<E>,
    loaders: Loaders,
    pipeline: HtmlPipeline,
}

impl<S, E> CampaignService<S, E>
where
    S: Storage,
    E: TemplateEngine,
{
    /// Creates a new campaign service.
    pub fn new(
        config: CampaignConfig,
        storage: Arc<S>,
        engine: Arc<E>,
        loaders: Loaders,
        pipeline: HtmlPipeline,
    ) -> Self {
        Self {
            config,
            storage,
            engine,
            loaders,
            pipeline,
        }
    }

    /// Loads the template `template_id` and the recipient list `list_id`.
    ///
    /// The template is read, split and parsed before the recipient list is
    /// touched, so a broken template is always reported as such.
    ///
    /// # Returns
    /// - [`Ok`] with the immutable [`Campaign`].
    /// - [`Err`] containing a [`LoadCampaignError`] naming the failing file.
    pub fn load_campaign(
        &self,
        template_id: &str,
        list_id: &str,
    ) -> Result<Campaign<E::Template>, LoadCampaignError> {
        let template_path = self.config.template_path(template_id);

        info!(path = %template_path.display(), "loading template");

        let source = self
            .storage
            .read_to_string(&template_path)
            .map_err(|source| LoadCampaignError::TemplateRead {
                path: template_path.clone(),
                source,
            })?;

        let parsed = self.loaders.templates.parse(&source).map_err(|source| {
            LoadCampaignError::TemplateParse {
                path: template_path.clone(),
                source,
            }
        })?;

        let body = self
            .engine
            .parse(&template_path.display().to_string(), &parsed.body)
            .map_err(|source| LoadCampaignError::TemplateSyntax {
                path: template_path.clone(),
                source,
            })?;

        let list_path = self.config.list_path(list_id);

        info!(path = %list_path.display(), "loading recipients");

        let raw = self
            .storage
            .read(&list_path)
            .map_err(|source| LoadCampaignError::RecipientRead {
                path: list_path.clone(),
                source,
            })?;

        let recipients = self.loaders.recipients.parse(&raw).map_err(|source| {
            LoadCampaignError::RecipientParse {
                path: list_path.clone(),
                source,
            }
        })?;

        debug!(recipients = recipients.len(), "campaign loaded");

        Ok(Campaign::new(
            template_path,
            parsed.metadata,
            body,
            recipients,
        ))
    }

    /// Renders the message for the recipient at `index`.
    ///
    /// The body is rendered once, then wrapped in the plain-text layout for
    /// the plain part, and converted to HTML, wrapped in the HTML layout and
    /// style-inlined for the HTML part.
    ///
    /// # Returns
    /// - [`Ok`] with a fresh [`RenderedMessage`].
    /// - [`Err`] with [`RenderMessageError::IndexOutOfRange`] if `index` is
    ///   not a recipient, or [`RenderMessageError::Render`] naming the stage
    ///   that failed.
    pub fn render_message(
        &self,
        campaign: &Campaign<E::Template>,
        index: usize,
    ) -> Result<RenderedMessage, RenderMessageError> {
        let recipient =
            campaign
                .recipient(index)
                .ok_or_else(|| RenderMessageError::IndexOutOfRange {
                    index,
                    len: campaign.len(),
                })?;

        let metadata = campaign.metadata();
        let context = RenderContext::new(recipient, metadata);

        let body = self
            .engine
            .render(campaign.body(), &context)
            .map_err(failed(index, RenderStage::Body))?;

        let context = context.with_stylesheet(self.load_stylesheet());
        let composer = LayoutComposer::new(self.storage.as_ref(), self.engine.as_ref());

        let plain_body = composer
            .compose(
                body.clone(),
                &self.config.plain_layout_path(),
                "",
                &context,
            )
            .map_err(failed(index, RenderStage::PlainLayout))?;

        let body_html = self
            .pipeline
            .converter
            .convert(&body)
            .map_err(failed(index, RenderStage::Markdown))?;

        let wrapped = composer
            .compose(
                body_html,
                &self.config.html_layout_path(),
                DEFAULT_HTML_LAYOUT,
                &context,
            )
            .map_err(failed(index, RenderStage::HtmlLayout))?;

        let html_body = self
            .pipeline
            .inliner
            .inline(&wrapped, context.stylesheet())
            .map_err(failed(index, RenderStage::Inlining))?;

        Ok(RenderedMessage {
            to: recipient.email(),
            to_name: recipient.username(),
            from: metadata.sender(),
            subject: metadata.subject(),
            plain_body,
            html_body,
        })
    }

    /// Reads the shared stylesheet. A missing or unreadable stylesheet
    /// yields an empty one.
    fn load_stylesheet(&self) -> String {
        let path = self.config.stylesheet_path();

        if !self.storage.is_file(&path) {
            return String::new();
        }

        match self.storage.read_to_string(&path) {
            Ok(css) => css,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable stylesheet");

                String::new()
            }
        }
    }
}

fn failed<T>(index: usize, stage: RenderStage) -> impl FnOnce(T) -> RenderMessageError
where
    T: Into<RenderError>,
{
    move |err| RenderMessageError::Render {
        index,
        stage,
        source: err.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use testresult::TestResult;

    use crate::{
        domain::rendering::{
            tests::{MockMarkupConverter, MockStyleInliner},
            ConversionError, InliningError,
        },
        infrastructure::{
            default_html_pipeline, default_loaders, rendering::HandlebarsEngine,
            storage::MemoryStorage,
        },
    };

    use super::*;

    const TEMPLATE: &str = "\
---
subject: Hi {{Campaign.name}}
name: Fall
from: news@example.com
---
Hello {{User.username}}";
    const RECIPIENTS: &str = "- email: a@x.com\n  username: A\n- email: b@x.com\n  username: B\n";

    fn config() -> CampaignConfig {
        CampaignConfig::new("content", "lists", "layouts")
    }

    fn storage() -> MemoryStorage {
        MemoryStorage::new()
            .with_file("content/fall.md", TEMPLATE)
            .with_file("lists/customers.yml", RECIPIENTS)
    }

    fn service(storage: MemoryStorage) -> CampaignService<MemoryStorage, HandlebarsEngine> {
        CampaignService::new(
            config(),
            Arc::new(storage),
            Arc::new(HandlebarsEngine::new()),
            default_loaders(),
            default_html_pipeline(),
        )
    }

    #[test]
    fn test_render_substitutes_recipient_variables() -> TestResult {
        let service = service(storage());
        let campaign = service.load_campaign("fall", "customers")?;

        let message = service.render_message(&campaign, 0)?;

        assert_eq!(message.plain_body, "Hello A");
        assert_eq!(message.to, "a@x.com");
        assert_eq!(message.to_name, "A");
        assert_eq!(message.from, "news@example.com");
        assert_eq!(message.subject, "Hi {{Campaign.name}}");

        Ok(())
    }

    #[test]
    fn test_render_is_idempotent() -> TestResult {
        let service = service(storage());
        let campaign = service.load_campaign("fall", "customers")?;

        let first = service.render_message(&campaign, 1)?;
        let second = service.render_message(&campaign, 1)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn test_missing_html_layout_uses_minimal_wrapper() -> TestResult {
        let service = service(storage());
        let campaign = service.load_campaign("fall", "customers")?;

        let message = service.render_message(&campaign, 0)?;

        assert!(message.html_body.starts_with("<html>"));
        assert!(message.html_body.contains("<body><p>Hello A</p>"));
        assert!(message.html_body.ends_with("</body></html>"));

        Ok(())
    }

    #[test]
    fn test_layouts_wrap_both_parts() -> TestResult {
        let storage = storage()
            .with_file(
                "layouts/_default.text",
                "{{Content}}\n\n-- {{Campaign.name}} team, for {{User.email}}",
            )
            .with_file(
                "layouts/_default.html",
                concat!(
                    "<html><head><style>{{CssContent}}</style></head>",
                    "<body><div class=\"main\">{{Content}}</div></body></html>",
                ),
            )
            .with_file("layouts/_default.css", ".main { color: red; }");

        let service = service(storage);
        let campaign = service.load_campaign("fall", "customers")?;

        let message = service.render_message(&campaign, 1)?;

        assert_eq!(message.plain_body, "Hello B\n\n-- Fall team, for b@x.com");
        assert!(message.html_body.contains("<div class=\"main\" style=\"color:"));
        assert!(message.html_body.contains("<p>Hello B</p>"));
        assert!(!message.html_body.contains("<style>"));

        Ok(())
    }

    #[test]
    fn test_stylesheet_applies_without_html_layout() -> TestResult {
        let storage = storage().with_file("layouts/_default.css", "p { color: blue; }");

        let service = service(storage);
        let campaign = service.load_campaign("fall", "customers")?;

        let message = service.render_message(&campaign, 0)?;

        assert!(message.html_body.contains("<p style=\"color:"));
        assert!(message.html_body.contains("blue;\">Hello A</p>"));

        Ok(())
    }

    #[test]
    fn test_unreadable_stylesheet_is_ignored() -> TestResult {
        let storage = storage().with_file("layouts/_default.css", vec![0xff_u8, 0xfe, 0xfd]);

        let service = service(storage);
        let campaign = service.load_campaign("fall", "customers")?;

        let message = service.render_message(&campaign, 0)?;

        assert!(message.html_body.contains("<p>Hello A</p>"));

        Ok(())
    }

    #[test]
    fn test_index_out_of_range() -> TestResult {
        let service = service(storage());
        let campaign = service.load_campaign("fall", "customers")?;

        let result = service.render_message(&campaign, campaign.len());

        assert!(matches!(
            result,
            Err(RenderMessageError::IndexOutOfRange { index: 2, len: 2 })
        ));

        Ok(())
    }

    #[test]
    fn test_invalid_template_is_reported_before_recipients() {
        let storage = MemoryStorage::new()
            .with_file("content/fall.md", "Hello {{#if User.username}}A{{/each}}")
            .with_file("lists/customers.yml", "not: [a, list");

        let result = service(storage).load_campaign("fall", "customers");

        assert!(matches!(
            result,
            Err(LoadCampaignError::TemplateSyntax { ref path, .. }) if path.ends_with("fall.md")
        ));
    }

    #[test]
    fn test_missing_template_names_its_path() {
        let result = service(MemoryStorage::new()).load_campaign("spring", "customers");

        let err = result.expect_err("template does not exist");

        assert!(err.is_template_error());
        assert_eq!(err.path(), config().template_path("spring"));
    }

    #[test]
    fn test_unterminated_frontmatter_is_a_parse_error() {
        let storage = MemoryStorage::new()
            .with_file("content/fall.md", "---\nsubject: Hi\nHello")
            .with_file("lists/customers.yml", RECIPIENTS);

        let result = service(storage).load_campaign("fall", "customers");

        assert!(matches!(result, Err(LoadCampaignError::TemplateParse { .. })));
    }

    #[test]
    fn test_recipient_errors_name_the_list() {
        let storage = storage().with_file("lists/broken.yml", "- username: nobody\n");

        let result = service(storage).load_campaign("fall", "broken");

        let err = result.expect_err("recipient has no email");

        assert!(!err.is_template_error());
        assert!(matches!(err, LoadCampaignError::RecipientParse { .. }));
        assert_eq!(err.path(), config().list_path("broken"));
    }

    #[test]
    fn test_missing_recipient_list() {
        let result = service(storage()).load_campaign("fall", "nobody");

        assert!(matches!(result, Err(LoadCampaignError::RecipientRead { .. })));
    }

    #[test]
    fn test_conversion_failure_reports_stage() -> TestResult {
        let mut converter = MockMarkupConverter::new();

        converter
            .expect_convert()
            .times(1)
            .returning(|_| Err(ConversionError("unbalanced markup".to_string())));

        let service = CampaignService::new(
            config(),
            Arc::new(storage()),
            Arc::new(HandlebarsEngine::new()),
            default_loaders(),
            HtmlPipeline {
                converter: Arc::new(converter),
                ..default_html_pipeline()
            },
        );

        let campaign = service.load_campaign("fall", "customers")?;
        let err = service
            .render_message(&campaign, 1)
            .expect_err("conversion fails");

        assert_eq!(err.index(), 1);
        assert_eq!(err.stage(), Some(RenderStage::Markdown));

        Ok(())
    }

    #[test]
    fn test_inlining_failure_reports_stage() -> TestResult {
        let mut inliner = MockStyleInliner::new();

        inliner
            .expect_inline()
            .times(1)
            .returning(|_, _| Err(InliningError("invalid selector".to_string())));

        let service = CampaignService::new(
            config(),
            Arc::new(storage()),
            Arc::new(HandlebarsEngine::new()),
            default_loaders(),
            HtmlPipeline {
                inliner: Arc::new(inliner),
                ..default_html_pipeline()
            },
        );

        let campaign = service.load_campaign("fall", "customers")?;
        let err = service
            .render_message(&campaign, 0)
            .expect_err("inlining fails");

        assert_eq!(err.stage(), Some(RenderStage::Inlining));

        Ok(())
    }

    #[test]
    fn test_body_render_failure_reports_stage() -> TestResult {
        let storage = storage().with_file("content/broken.md", "{{#if}}never{{/if}}");

        let service = service(storage);
        let campaign = service.load_campaign("broken", "customers")?;

        let err = service
            .render_message(&campaign, 1)
            .expect_err("helper is missing its parameter");

        assert_eq!(err.index(), 1);
        assert!(matches!(
            err,
            RenderMessageError::Render {
                stage: RenderStage::Body,
                source: RenderError::Template(_),
                ..
            }
        ));

        Ok(())
    }

    #[test]
    fn test_malformed_plain_layout_reports_stage() -> TestResult {
        let storage = storage().with_file(
            "layouts/_default.text",
            "{{#if User.username}}mismatched{{/each}}",
        );

        let service = service(storage);
        let campaign = service.load_campaign("fall", "customers")?;

        let err = service
            .render_message(&campaign, 0)
            .expect_err("plain layout does not parse");

        assert!(matches!(
            err,
            RenderMessageError::Render {
                stage: RenderStage::PlainLayout,
                source: RenderError::Syntax(_),
                ..
            }
        ));

        Ok(())
    }

    #[test]
    fn test_unreadable_html_layout_fails_render() -> TestResult {
        let storage = storage().with_file("layouts/_default.html", vec![0xc3_u8, 0x28]);

        let service = service(storage);
        let campaign = service.load_campaign("fall", "customers")?;

        let err = service
            .render_message(&campaign, 0)
            .expect_err("layout is not UTF-8");

        assert!(matches!(
            err,
            RenderMessageError::Render {
                stage: RenderStage::HtmlLayout,
                source: RenderError::LayoutRead { .. },
                ..
            }
        ));

        Ok(())
    }

    #[test]
    fn test_concurrent_renders_match_sequential() -> TestResult {
        let service = service(storage());
        let campaign = service.load_campaign("fall", "customers")?;

        let sequential = (0..campaign.len())
            .map(|i| service.render_message(&campaign, i))
            .collect::<Result<Vec<_>, _>>()?;

        let concurrent = thread::scope(|scope| {
            let handles = (0..campaign.len())
                .map(|i| {
                    let (service, campaign) = (&service, &campaign);
                    scope.spawn(move || service.render_message(campaign, i))
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("render thread panicked"))
                .collect::<Result<Vec<_>, _>>()
        })?;

        assert_eq!(sequential, concurrent);

        Ok(())
    }
}
