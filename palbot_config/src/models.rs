//! Known model names for each provider, surfaced by `palbot info`.

/// Providers and the models known to work with each.
///
/// Informational only; the configured model is passed through to the
/// backend verbatim.
#[must_use]
pub const fn available_models() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        (
            "openai",
            &[
                "gpt-4",
                "gpt-4-turbo-preview",
                "gpt-3.5-turbo",
                "gpt-3.5-turbo-16k",
            ],
        ),
        (
            "anthropic",
            &[
                "claude-3-5-sonnet-20241022",
                "claude-3-opus-20240229",
                "claude-3-sonnet-20240229",
                "claude-3-haiku-20240307",
            ],
        ),
        (
            "huggingface",
            &["gpt2", "google/flan-t5-base", "microsoft/DialoGPT-medium"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_three_providers() {
        let providers: Vec<&str> = available_models().iter().map(|(p, _)| *p).collect();
        assert_eq!(providers, vec!["openai", "anthropic", "huggingface"]);
        assert!(available_models().iter().all(|(_, models)| !models.is_empty()));
    }
}
