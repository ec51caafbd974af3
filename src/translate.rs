//! Machine translation interface
//!
//! The engine only defines the seam; a concrete web-service client is the
//! embedding application's business. Tests and the bundled binary inject
//! their own implementations.

/// A translation engine taking recognized text and a target language code
pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, target_lang: &str) -> anyhow::Result<String>;
}

/// Placeholder used when no translation service is configured.
/// Every request fails, which leaves regions untranslated.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn translate(&self, _text: &str, _target_lang: &str) -> anyhow::Result<String> {
        anyhow::bail!("no translation service configured")
    }
}
