//! Worker pool for recognition and translation requests
//!
//! The main surface never blocks: crops are handed to `spawn_blocking`
//! workers and outcomes come back over a channel as [`TaskUpdate`]s. The
//! owner drains the channel on the main surface and applies each update
//! through the editing session, which checks the target region is still
//! live. There is no cancellation; stale results are simply dropped there.

use std::sync::Arc;

use image::RgbaImage;
use tokio::sync::mpsc;

use crate::domain::RegionId;
use crate::ocr::Recognizer;
use crate::translate::Translator;

/// Outcome of one recognition or translation task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    Recognized(String),
    RecognitionFailed(String),
    Translated(String),
    TranslationFailed(String),
}

/// A completed task, addressed to a region by identifier
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskUpdate {
    pub region_id: RegionId,
    pub outcome: TaskOutcome,
}

/// Shared handles for submitting work and receiving completions
pub struct RecognitionPipeline {
    recognizer: Arc<dyn Recognizer>,
    translator: Arc<dyn Translator>,
    target_lang: String,
    tx: mpsc::UnboundedSender<TaskUpdate>,
    rx: mpsc::UnboundedReceiver<TaskUpdate>,
}

impl RecognitionPipeline {
    /// Build a pipeline around the given engines. `target_lang` is the
    /// language code handed to the translator for every request.
    pub fn new(
        recognizer: Arc<dyn Recognizer>,
        translator: Arc<dyn Translator>,
        target_lang: impl Into<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            recognizer,
            translator,
            target_lang: target_lang.into(),
            tx,
            rx,
        }
    }

    /// Recognize a freshly committed region's crop, then chain a
    /// translation request on success. Must be called within a tokio
    /// runtime.
    pub fn submit_recognition(&self, region_id: RegionId, crop: RgbaImage) {
        let recognizer = Arc::clone(&self.recognizer);
        let translator = Arc::clone(&self.translator);
        let target_lang = self.target_lang.clone();
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            match recognizer.recognize(&crop) {
                Ok(text) => {
                    // receiver gone means the session shut down; nothing to do
                    let _ = tx.send(TaskUpdate {
                        region_id,
                        outcome: TaskOutcome::Recognized(text.clone()),
                    });
                    let outcome = match translator.translate(&text, &target_lang) {
                        Ok(translated) => TaskOutcome::Translated(translated),
                        Err(e) => TaskOutcome::TranslationFailed(e.to_string()),
                    };
                    let _ = tx.send(TaskUpdate { region_id, outcome });
                }
                Err(e) => {
                    let _ = tx.send(TaskUpdate {
                        region_id,
                        outcome: TaskOutcome::RecognitionFailed(e.to_string()),
                    });
                }
            }
        });
    }

    /// Translate already-recognized text, e.g. for a region loaded from a
    /// project file with no stored translation.
    pub fn submit_translation(&self, region_id: RegionId, text: String) {
        let translator = Arc::clone(&self.translator);
        let target_lang = self.target_lang.clone();
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = match translator.translate(&text, &target_lang) {
                Ok(translated) => TaskOutcome::Translated(translated),
                Err(e) => TaskOutcome::TranslationFailed(e.to_string()),
            };
            let _ = tx.send(TaskUpdate { region_id, outcome });
        });
    }

    /// Non-blocking drain step for the main surface's event loop
    pub fn try_recv(&mut self) -> Option<TaskUpdate> {
        self.rx.try_recv().ok()
    }

    /// Await the next completion
    pub async fn recv(&mut self) -> Option<TaskUpdate> {
        self.rx.recv().await
    }
}
