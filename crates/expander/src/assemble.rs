//! Content assembly.
//!
//! Drives placeholder parsing, loader resolution, and local-file handling
//! for each segment, appending content blocks in segment order. The
//! [`Assembler`] owns a `MessageBuilder` for the duration of one call, so
//! coalescing and ordering are enforced in one place.
//!
//! Recovery policy: a placeholder that cannot be parsed or resolved is kept
//! verbatim as literal text (user messages are full of brace-like text that
//! is not a reference). I/O failure on a *recognized* reference surfaces —
//! swallowing it would silently drop content the user asked to include.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use docweave_core::{Error, ExpandedMessage, LoaderRegistry, MessageBuilder, PageSet, Result};

use crate::pdf;
use crate::placeholder::{Placeholder, parse_placeholder};
use crate::segment::{Delimiters, Segment};

/// File extensions treated as inline images.
const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Assembles one message from its segments.
///
/// One assembler per `expand` call; it is consumed by [`Assembler::assemble`]
/// and never shared.
pub struct Assembler<'a> {
    registry: &'a LoaderRegistry,
    delimiters: &'a Delimiters,
    builder: MessageBuilder,
}

impl<'a> Assembler<'a> {
    pub fn new(registry: &'a LoaderRegistry, delimiters: &'a Delimiters) -> Self {
        Self {
            registry,
            delimiters,
            builder: MessageBuilder::new(),
        }
    }

    /// Consume the segments and produce the expanded message.
    pub async fn assemble(mut self, segments: Vec<Segment>) -> Result<ExpandedMessage> {
        for segment in segments {
            match segment {
                Segment::Literal(text) => self.builder.push_text(&text),
                Segment::Placeholder { raw, .. } => self.expand_placeholder(&raw).await?,
            }
        }
        Ok(self.builder.finish())
    }

    async fn expand_placeholder(&mut self, raw: &str) -> Result<()> {
        let placeholder = match parse_placeholder(raw) {
            Ok(placeholder) => placeholder,
            Err(err) => {
                tracing::debug!(raw, %err, "placeholder kept as literal");
                self.push_raw(raw);
                return Ok(());
            }
        };

        if let Some(loader) = self.registry.resolve(&placeholder.locator) {
            tracing::debug!(loader = loader.name(), locator = %placeholder.locator, "loading");
            let doc = loader.load(&placeholder.locator, &placeholder.options).await?;
            let title = placeholder
                .options
                .title()
                .map(str::to_string)
                .or(doc.title);
            self.push_document(title.as_deref(), &doc.body);
            return Ok(());
        }

        let path = Path::new(&placeholder.locator);
        if path.exists() {
            return self.append_local(path, &placeholder, raw).await;
        }

        tracing::debug!(locator = %placeholder.locator, "unresolved locator kept as literal");
        self.push_raw(raw);
        Ok(())
    }

    /// Re-emit the original token, delimiters included.
    fn push_raw(&mut self, raw: &str) {
        self.builder.push_text(&self.delimiters.wrap(raw));
    }

    /// The uniform presentation rule for resolved text content: a heading
    /// line when a title is known, then the body.
    fn push_document(&mut self, title: Option<&str>, body: &str) {
        match title {
            Some(title) => self.builder.push_text(&format!("### {title} ###\n{body}")),
            None => self.builder.push_text(body),
        }
    }

    async fn append_local(
        &mut self,
        path: &Path,
        placeholder: &Placeholder,
        raw: &str,
    ) -> Result<()> {
        let title = effective_title(placeholder, path);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            self.append_image(path, &title, &extension).await
        } else if extension == "pdf" {
            self.append_pdf(path, &title, placeholder, raw).await
        } else {
            self.append_text_file(path, &title).await
        }
    }

    async fn append_image(&mut self, path: &Path, title: &str, extension: &str) -> Result<()> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            docweave_core::ExpandError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        self.builder.push_text(&format!("### {title} ###"));
        self.builder
            .push_image(format!("image/{extension}"), BASE64.encode(&bytes));
        Ok(())
    }

    async fn append_pdf(
        &mut self,
        path: &Path,
        title: &str,
        placeholder: &Placeholder,
        raw: &str,
    ) -> Result<()> {
        let pages: Option<PageSet> = match placeholder.options.pages() {
            None => None,
            Some(Ok(pages)) => Some(pages),
            Some(Err(err)) if err.is_recoverable() => {
                tracing::debug!(raw, %err, "bad page selector, placeholder kept as literal");
                self.push_raw(raw);
                return Ok(());
            }
            Some(Err(err)) => return Err(err.into()),
        };

        self.builder.push_text(&format!("### {title} ###"));

        let path_buf = path.to_path_buf();
        let jpegs = tokio::task::spawn_blocking(move || pdf::rasterize(&path_buf, pages.as_ref()))
            .await
            .map_err(|e| Error::Internal(format!("pdf rasterization task failed: {e}")))??;

        for jpeg in jpegs {
            self.builder.push_image("image/jpg", BASE64.encode(&jpeg));
        }
        Ok(())
    }

    async fn append_text_file(&mut self, path: &Path, title: &str) -> Result<()> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            docweave_core::ExpandError::FileRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        self.builder
            .push_text(&format!("### {title} ###\n```\n{content}\n```"));
        Ok(())
    }
}

/// Title precedence: `title` option, else the file name.
fn effective_title(placeholder: &Placeholder, path: &Path) -> String {
    placeholder
        .options
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| placeholder.locator.clone())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;
    use async_trait::async_trait;
    use docweave_core::{
        ContentBlock, ContentLoader, LoadedDocument, LoaderError, LoaderOptions,
    };
    use std::io::Write;

    /// A stub loader for a fake `doc://` scheme.
    struct DocLoader {
        title: Option<&'static str>,
    }

    #[async_trait]
    impl ContentLoader for DocLoader {
        fn name(&self) -> &str {
            "doc"
        }

        fn is_target(&self, locator: &str) -> bool {
            locator.starts_with("doc://")
        }

        async fn load(
            &self,
            locator: &str,
            _options: &LoaderOptions,
        ) -> std::result::Result<LoadedDocument, LoaderError> {
            Ok(LoadedDocument {
                title: self.title.map(str::to_string),
                body: format!("body of {locator}"),
            })
        }
    }

    /// A stub loader that always fails with a network error.
    struct BrokenLoader;

    #[async_trait]
    impl ContentLoader for BrokenLoader {
        fn name(&self) -> &str {
            "broken"
        }

        fn is_target(&self, locator: &str) -> bool {
            locator.starts_with("broken://")
        }

        async fn load(
            &self,
            _locator: &str,
            _options: &LoaderOptions,
        ) -> std::result::Result<LoadedDocument, LoaderError> {
            Err(LoaderError::Network {
                loader: "broken".into(),
                reason: "connection refused".into(),
            })
        }
    }

    fn registry() -> LoaderRegistry {
        let mut registry = LoaderRegistry::new();
        registry.register(Box::new(DocLoader {
            title: Some("Stub Doc"),
        }));
        registry.register(Box::new(BrokenLoader));
        registry
    }

    async fn expand(registry: &LoaderRegistry, message: &str) -> Result<ExpandedMessage> {
        let delimiters = Delimiters::default();
        Assembler::new(registry, &delimiters)
            .assemble(segment(message, &delimiters))
            .await
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> String {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn plain_message_collapses_to_text() {
        let message = expand(&registry(), "no placeholders here").await.unwrap();
        assert_eq!(message, ExpandedMessage::Text("no placeholders here".into()));
    }

    #[tokio::test]
    async fn empty_message_yields_empty_blocks() {
        let message = expand(&registry(), "").await.unwrap();
        assert!(message.is_empty());
    }

    #[tokio::test]
    async fn loader_content_gets_heading_and_coalesces() {
        let message = expand(&registry(), "See {doc://page} now").await.unwrap();
        assert_eq!(
            message,
            ExpandedMessage::Text(
                "See \n### Stub Doc ###\nbody of doc://page\n now".into()
            )
        );
    }

    #[tokio::test]
    async fn title_option_overrides_loader_title() {
        let message = expand(&registry(), "{doc://page|title=Mine}").await.unwrap();
        let ExpandedMessage::Text(text) = message else {
            panic!("expected collapsed text");
        };
        assert!(text.starts_with("### Mine ###"));
        assert!(!text.contains("Stub Doc"));
    }

    #[tokio::test]
    async fn untitled_loader_content_has_no_heading() {
        let mut registry = LoaderRegistry::new();
        registry.register(Box::new(DocLoader { title: None }));
        let message = expand(&registry, "{doc://page}").await.unwrap();
        assert_eq!(message, ExpandedMessage::Text("body of doc://page".into()));
    }

    #[tokio::test]
    async fn unresolved_placeholder_kept_verbatim() {
        let message = expand(&registry(), "see {not/a/real/path} ok").await.unwrap();
        assert_eq!(
            message,
            ExpandedMessage::Text("see \n{not/a/real/path}\n ok".into())
        );
    }

    #[tokio::test]
    async fn malformed_option_degrades_to_literal() {
        let message = expand(&registry(), "{foo.txt|badoption}").await.unwrap();
        assert_eq!(message, ExpandedMessage::Text("{foo.txt|badoption}".into()));
    }

    #[tokio::test]
    async fn loader_failure_surfaces() {
        let err = expand(&registry(), "see {broken://thing}").await.unwrap_err();
        assert!(matches!(err, Error::Loader(LoaderError::Network { .. })));
    }

    #[tokio::test]
    async fn text_file_wrapped_in_titled_fence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"line one\nline two");
        let message = expand(&registry(), &format!("{{{path}}}")).await.unwrap();
        let ExpandedMessage::Text(text) = message else {
            panic!("expected collapsed text");
        };
        assert!(text.starts_with("### notes.txt ###\n```\n"));
        assert!(text.contains("line one\nline two"));
        assert!(text.trim_end().ends_with("```"));
    }

    #[tokio::test]
    async fn text_file_title_option_wins_over_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "notes.txt", b"content");
        let message = expand(&registry(), &format!("{{{path}|title=My Notes}}"))
            .await
            .unwrap();
        let ExpandedMessage::Text(text) = message else {
            panic!("expected collapsed text");
        };
        assert!(text.starts_with("### My Notes ###"));
        assert!(!text.contains("notes.txt"));
    }

    #[tokio::test]
    async fn image_file_becomes_heading_plus_image_block() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = b"\x89PNG\r\n\x1a\nfakepixels";
        let path = write_file(&dir, "pic.png", bytes);
        let message = expand(&registry(), &format!("look {{{path}}}")).await.unwrap();

        let ExpandedMessage::Blocks(blocks) = message else {
            panic!("expected block sequence");
        };
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].as_text(), Some("look \n### pic.png ###"));
        let ContentBlock::Image { media_type, data } = &blocks[1] else {
            panic!("expected image block");
        };
        assert_eq!(media_type, "image/png");
        assert_eq!(data, &BASE64.encode(bytes));
    }

    #[tokio::test]
    async fn image_extension_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "anim.GIF", b"GIF89a");
        let message = expand(&registry(), &format!("{{{path}}}")).await.unwrap();
        let ExpandedMessage::Blocks(blocks) = message else {
            panic!("expected block sequence");
        };
        assert!(matches!(
            &blocks[1],
            ContentBlock::Image { media_type, .. } if media_type == "image/gif"
        ));
    }

    #[tokio::test]
    async fn order_preserved_across_mixed_segments() {
        let dir = tempfile::tempdir().unwrap();
        let img = write_file(&dir, "a.png", b"png-bytes");
        let txt = write_file(&dir, "b.txt", b"text-body");
        let message = expand(&registry(), &format!("one {{{img}}} two {{{txt}}} three"))
            .await
            .unwrap();

        let ExpandedMessage::Blocks(blocks) = message else {
            panic!("expected block sequence");
        };
        // text("one" + heading), image, text("two" + fenced b.txt + "three")
        assert_eq!(blocks.len(), 3);
        assert!(blocks[0].as_text().unwrap().starts_with("one "));
        assert!(!blocks[1].is_text());
        let tail = blocks[2].as_text().unwrap();
        assert!(tail.contains("text-body"));
        assert!(tail.trim_end().ends_with("three"));
    }

    #[tokio::test]
    async fn invalid_page_selector_on_pdf_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "doc.pdf", b"%PDF-1.4 stub");
        let err = expand(&registry(), &format!("{{{path}|pages=0-2}}"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Expand(docweave_core::ExpandError::InvalidPageSelector { .. })
        ));
    }

    #[tokio::test]
    async fn non_numeric_page_selector_on_pdf_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "doc.pdf", b"%PDF-1.4 stub");
        let message = expand(&registry(), &format!("{{{path}|pages=abc}}"))
            .await
            .unwrap();
        let ExpandedMessage::Text(text) = message else {
            panic!("expected collapsed text");
        };
        assert!(text.contains("pages=abc"));
        assert!(text.starts_with('{') && text.ends_with('}'));
    }

    #[tokio::test]
    async fn extensionless_file_read_as_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "README", b"read me");
        let message = expand(&registry(), &format!("{{{path}}}")).await.unwrap();
        let ExpandedMessage::Text(text) = message else {
            panic!("expected collapsed text");
        };
        assert!(text.starts_with("### README ###"));
        assert!(text.contains("read me"));
    }
}
