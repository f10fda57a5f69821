use crate::providers::{ImageSource, TranslationSource};

/// Result of a related-image search. An empty result set and a failed
/// request are distinct states.
#[derive(Debug, PartialEq, Eq)]
pub enum ImageOutcome {
    Images(Vec<String>),
    NoImages,
    Error(String),
}

/// Result of a translation request.
#[derive(Debug, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    /// The service responded but had no usable translation.
    Unavailable,
    /// The service could not be reached or answered with garbage.
    Unreachable(String),
    /// No word is currently displayed; nothing was requested.
    NoWordSelected,
}

/// Best-effort decoration around a primary lookup. Neither fetcher can fail
/// the lookup; every failure resolves to an outcome value.
pub struct Enricher {
    images: Box<dyn ImageSource>,
    translator: Box<dyn TranslationSource>,
    image_count: usize,
}

impl Enricher {
    pub fn new(
        images: Box<dyn ImageSource>,
        translator: Box<dyn TranslationSource>,
        image_count: usize,
    ) -> Self {
        Self {
            images,
            translator,
            image_count,
        }
    }

    pub async fn fetch_related_images(&self, term: &str) -> ImageOutcome {
        match self.images.search(term, self.image_count).await {
            Ok(urls) if urls.is_empty() => ImageOutcome::NoImages,
            Ok(urls) => ImageOutcome::Images(urls),
            Err(e) => ImageOutcome::Error(e.to_string()),
        }
    }

    /// Translate the currently displayed word. Short-circuits without any
    /// network call when no word is displayed.
    pub async fn translate(&self, word: Option<&str>, target_code: &str) -> TranslationOutcome {
        let word = match word {
            Some(w) if !w.trim().is_empty() => w,
            _ => return TranslationOutcome::NoWordSelected,
        };

        match self.translator.translate(word, target_code).await {
            Ok(Some(text)) => TranslationOutcome::Translated(text),
            Ok(None) => TranslationOutcome::Unavailable,
            Err(e) => TranslationOutcome::Unreachable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedImages(Result<Vec<String>, ()>);

    #[async_trait]
    impl ImageSource for FixedImages {
        async fn search(&self, _term: &str, _count: usize) -> Result<Vec<String>, SourceError> {
            match &self.0 {
                Ok(urls) => Ok(urls.clone()),
                Err(()) => Err(SourceError::Network("down".to_string())),
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct CountingTranslator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TranslationSource for CountingTranslator {
        async fn translate(
            &self,
            text: &str,
            _target: &str,
        ) -> Result<Option<String>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(format!("{}-translated", text)))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn enricher(
        images: Result<Vec<String>, ()>,
        calls: Arc<AtomicUsize>,
    ) -> Enricher {
        Enricher::new(
            Box::new(FixedImages(images)),
            Box::new(CountingTranslator { calls }),
            4,
        )
    }

    #[tokio::test]
    async fn image_hits_come_back_in_order() {
        let e = enricher(
            Ok(vec!["a.jpg".to_string(), "b.jpg".to_string()]),
            Arc::new(AtomicUsize::new(0)),
        );

        assert_eq!(
            e.fetch_related_images("cat").await,
            ImageOutcome::Images(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
    }

    #[tokio::test]
    async fn zero_hits_is_distinct_from_an_error() {
        let empty = enricher(Ok(vec![]), Arc::new(AtomicUsize::new(0)));
        let failing = enricher(Err(()), Arc::new(AtomicUsize::new(0)));

        assert_eq!(empty.fetch_related_images("cat").await, ImageOutcome::NoImages);
        assert!(matches!(
            failing.fetch_related_images("cat").await,
            ImageOutcome::Error(_)
        ));
    }

    #[tokio::test]
    async fn translate_without_a_word_makes_no_network_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let e = enricher(Ok(vec![]), calls.clone());

        assert_eq!(e.translate(None, "es").await, TranslationOutcome::NoWordSelected);
        assert_eq!(
            e.translate(Some("   "), "es").await,
            TranslationOutcome::NoWordSelected
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn translate_with_a_word_goes_through() {
        let calls = Arc::new(AtomicUsize::new(0));
        let e = enricher(Ok(vec![]), calls.clone());

        assert_eq!(
            e.translate(Some("hello"), "es").await,
            TranslationOutcome::Translated("hello-translated".to_string())
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
