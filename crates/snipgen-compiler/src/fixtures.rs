//! Golden fixture corpus: the built-in case table and the oracle that
//! regenerates or verifies it on disk.
//!
//! Layout: `<root>/<case>/<ordinal>.<client>.<provider>.<ext>`, where the
//! ordinal is the snippet's position among the clients generated for one
//! (provider, language) pair. Files carry no trailing newline.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use snipgen_core::{CredentialKind, Language, TokenSource, Variant};
use snipgen_provider::ProviderSelection;
use tracing::{debug, info};

use crate::compiler::Compiler;
use crate::error::FixtureError;

/// One named fixture case: a task and model rendered for each listed provider.
#[derive(Debug, Clone)]
pub struct FixtureCase {
    pub name: &'static str,
    pub task: &'static str,
    pub model: &'static str,
    pub providers: &'static [&'static str],
    pub variant: Variant,
}

impl FixtureCase {
    fn new(
        name: &'static str,
        task: &'static str,
        model: &'static str,
        providers: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            task,
            model,
            providers,
            variant: Variant::new(),
        }
    }

    fn for_task(
        task: &'static str,
        model: &'static str,
        providers: &'static [&'static str],
    ) -> Self {
        Self::new(task, task, model, providers)
    }

    fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }
}

const LLM: &str = "meta-llama/Llama-3.1-8B-Instruct";
const VLM: &str = "meta-llama/Llama-3.2-11B-Vision-Instruct";
const SST2: &str = "distilbert/distilbert-base-uncased-finetuned-sst-2-english";
const HF: &[&str] = &["hf-inference"];

/// The built-in case table.
pub fn builtin_cases() -> Vec<FixtureCase> {
    vec![
        FixtureCase::new(
            "conversational-llm-non-stream",
            "conversational",
            LLM,
            &["hf-inference", "together"],
        ),
        FixtureCase::new(
            "conversational-llm-stream",
            "conversational",
            LLM,
            &["hf-inference", "together"],
        )
        .with_variant(Variant::new().with_streaming(true)),
        FixtureCase::new(
            "conversational-vlm-non-stream",
            "conversational-vlm",
            VLM,
            &["hf-inference", "fireworks-ai"],
        ),
        FixtureCase::new(
            "conversational-vlm-stream",
            "conversational-vlm",
            VLM,
            &["hf-inference", "fireworks-ai"],
        )
        .with_variant(Variant::new().with_streaming(true)),
        FixtureCase::new(
            "conversational-llm-auto",
            "conversational",
            "meta-llama/Llama-3.1-8B-Instruct:cerebras",
            &["auto"],
        ),
        FixtureCase::new("conversational-llm-options", "conversational", LLM, HF).with_variant(
            Variant::new()
                .with_temperature(0.5)
                .with_top_p(0.7)
                .with_max_tokens(512),
        ),
        FixtureCase::new("bill-to-param", "conversational", LLM, HF)
            .with_variant(Variant::new().with_bill_to("huggingface")),
        FixtureCase::new(
            "explicit-direct-request",
            "conversational",
            LLM,
            &["together"],
        )
        .with_variant(
            Variant::new()
                .with_credential(CredentialKind::ProviderKey)
                .with_token(TokenSource::RequiredEnv { var: None }),
        ),
        FixtureCase::new("with-custom-base-url", "conversational", LLM, HF)
            .with_variant(Variant::new().with_base_url("http://localhost:8080")),
        FixtureCase::new(
            "bring-your-own-token",
            "text-to-image",
            "black-forest-labs/FLUX.1-schnell",
            HF,
        )
        .with_variant(Variant::new().with_literal_token("hf_xxx")),
        FixtureCase::new("env-token-default", "text-classification", SST2, HF).with_variant(
            Variant::new().with_token(TokenSource::OptionalEnv {
                var: None,
                default: Some("hf_xxx".to_string()),
            }),
        ),
        FixtureCase::new(
            "bound-model",
            "conversational",
            LLM,
            &["auto", "hf-inference"],
        )
        .with_variant(Variant::new().with_bound_model(true)),
        FixtureCase::new("vlm-local-image", "conversational-vlm", VLM, HF)
            .with_variant(Variant::new().with_input_file("photo.jpg")),
        FixtureCase::for_task(
            "text-generation",
            "openai-community/gpt2",
            &["hf-inference", "together"],
        ),
        FixtureCase::for_task("text2text-generation", "google/flan-t5-base", HF),
        FixtureCase::for_task("summarization", "facebook/bart-large-cnn", HF),
        FixtureCase::for_task("translation", "google-t5/t5-small", HF),
        FixtureCase::for_task("fill-mask", "google-bert/bert-base-uncased", HF),
        FixtureCase::for_task("question-answering", "deepset/roberta-base-squad2", HF),
        FixtureCase::for_task("table-question-answering", "google/tapas-base-finetuned-wtq", HF),
        FixtureCase::for_task("text-classification", SST2, HF),
        FixtureCase::for_task("token-classification", "dslim/bert-base-NER", HF),
        FixtureCase::for_task("zero-shot-classification", "facebook/bart-large-mnli", HF),
        FixtureCase::for_task("tabular-classification", "julien-c/wine-quality", HF),
        FixtureCase::for_task("tabular-regression", "scikit-learn/Fish-Weight", HF),
        FixtureCase::for_task(
            "feature-extraction",
            "intfloat/multilingual-e5-large-instruct",
            &["hf-inference", "nebius", "sambanova"],
        ),
        FixtureCase::for_task(
            "sentence-similarity",
            "sentence-transformers/all-MiniLM-L6-v2",
            HF,
        ),
        FixtureCase::for_task(
            "automatic-speech-recognition",
            "openai/whisper-large-v3",
            &["hf-inference", "fal-ai"],
        ),
        FixtureCase::for_task(
            "audio-classification",
            "ehcalabres/wav2vec2-lg-xlsr-en-speech-emotion-recognition",
            HF,
        ),
        FixtureCase::for_task("audio-to-audio", "speechbrain/sepformer-wham", HF),
        FixtureCase::for_task("image-classification", "google/vit-base-patch16-224", HF),
        FixtureCase::for_task(
            "zero-shot-image-classification",
            "openai/clip-vit-large-patch14",
            HF,
        ),
        FixtureCase::for_task("object-detection", "facebook/detr-resnet-50", HF),
        FixtureCase::for_task(
            "image-segmentation",
            "nvidia/segformer-b0-finetuned-ade-512-512",
            HF,
        ),
        FixtureCase::for_task("image-to-text", "Salesforce/blip-image-captioning-base", HF),
        FixtureCase::for_task("document-question-answering", "impira/layoutlm-document-qa", HF),
        FixtureCase::for_task(
            "image-to-image",
            "black-forest-labs/FLUX.1-Kontext-dev",
            &["fal-ai", "hf-inference"],
        ),
        FixtureCase::for_task(
            "text-to-image",
            "black-forest-labs/FLUX.1-schnell",
            &[
                "hf-inference",
                "fal-ai",
                "together",
                "nebius",
                "replicate",
                "black-forest-labs",
            ],
        ),
        FixtureCase::for_task(
            "text-to-video",
            "Wan-AI/Wan2.1-T2V-14B",
            &["fal-ai", "novita", "replicate"],
        ),
        FixtureCase::for_task(
            "text-to-speech",
            "hexgrad/Kokoro-82M",
            &["hf-inference", "fal-ai", "replicate"],
        ),
        FixtureCase::for_task(
            "text-to-audio",
            "facebook/musicgen-small",
            &["hf-inference", "fal-ai"],
        ),
    ]
}

/// Find a built-in case by name.
pub fn find_case(name: &str) -> Result<FixtureCase, FixtureError> {
    builtin_cases()
        .into_iter()
        .find(|case| case.name == name)
        .ok_or_else(|| FixtureError::UnknownCase(name.to_string()))
}

/// A difference between the corpus on disk and freshly generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// Expected file absent on disk.
    Missing(PathBuf),
    /// File present but its content differs.
    Changed(PathBuf),
    /// File on disk that no tuple regenerates.
    Unexpected(PathBuf),
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "missing: {}", path.display()),
            Self::Changed(path) => write!(f, "changed: {}", path.display()),
            Self::Unexpected(path) => write!(f, "unexpected: {}", path.display()),
        }
    }
}

/// Result of verifying the corpus.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Regenerates or verifies fixture files under a root directory.
pub struct Oracle<'c> {
    compiler: &'c Compiler<'c>,
    root: PathBuf,
}

impl<'c> Oracle<'c> {
    pub fn new(compiler: &'c Compiler<'c>, root: impl Into<PathBuf>) -> Self {
        Self {
            compiler,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expected files for one case, keyed by file name.
    pub fn generate(&self, case: &FixtureCase) -> Result<BTreeMap<String, String>, FixtureError> {
        let mut files = BTreeMap::new();
        for provider in case.providers {
            let selection = ProviderSelection::from(*provider);
            for language in Language::ALL {
                let snippets = self
                    .compiler
                    .compile_all(case.task, &selection, case.model, language, &case.variant)
                    .map_err(|source| FixtureError::Engine {
                        case: case.name.to_string(),
                        source,
                    })?;
                for (ordinal, snippet) in snippets.into_iter().enumerate() {
                    files.insert(snippet.fixture_file_name(ordinal), snippet.content);
                }
            }
        }
        Ok(files)
    }

    /// Rewrite every case directory from scratch. Returns the number of files written.
    pub fn write(&self, cases: &[FixtureCase]) -> Result<usize, FixtureError> {
        let mut written = 0;
        for case in cases {
            let files = self.generate(case)?;
            let dir = self.root.join(case.name);
            if dir.exists() {
                fs::remove_dir_all(&dir).map_err(|e| FixtureError::io(&dir, e))?;
            }
            fs::create_dir_all(&dir).map_err(|e| FixtureError::io(&dir, e))?;
            for (name, content) in &files {
                let path = dir.join(name);
                fs::write(&path, content).map_err(|e| FixtureError::io(&path, e))?;
            }
            info!(case = case.name, files = files.len(), "regenerated fixtures");
            written += files.len();
        }
        Ok(written)
    }

    /// Compare the corpus on disk with freshly generated output.
    pub fn check(&self, cases: &[FixtureCase]) -> Result<CheckReport, FixtureError> {
        let mut report = CheckReport::default();
        for case in cases {
            let expected = self.generate(case)?;
            let dir = self.root.join(case.name);
            let on_disk = list_files(&dir)?;

            for (name, content) in &expected {
                let path = dir.join(name);
                report.checked += 1;
                if !on_disk.contains(name) {
                    report.discrepancies.push(Discrepancy::Missing(path));
                    continue;
                }
                let actual = fs::read_to_string(&path).map_err(|e| FixtureError::io(&path, e))?;
                if &actual != content {
                    report.discrepancies.push(Discrepancy::Changed(path));
                }
            }
            for name in on_disk.iter().filter(|name| !expected.contains_key(*name)) {
                report.discrepancies.push(Discrepancy::Unexpected(dir.join(name)));
            }
            debug!(case = case.name, files = expected.len(), "checked fixtures");
        }
        Ok(report)
    }
}

/// File names in `dir`, sorted. A missing directory has no files.
fn list_files(dir: &Path) -> Result<Vec<String>, FixtureError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| FixtureError::io(dir, e))? {
        let entry = entry.map_err(|e| FixtureError::io(dir, e))?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn case(name: &str) -> FixtureCase {
        find_case(name).unwrap()
    }

    #[test]
    fn test_case_names_are_unique() {
        let cases = builtin_cases();
        let names: HashSet<_> = cases.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), cases.len());
    }

    #[test]
    fn test_every_case_generates() {
        let compiler = Compiler::default();
        let oracle = Oracle::new(&compiler, "unused");
        for case in builtin_cases() {
            let files = oracle.generate(&case).unwrap();
            assert!(!files.is_empty(), "{} produced nothing", case.name);
        }
    }

    #[test]
    fn test_ordinals_follow_client_order() {
        let compiler = Compiler::default();
        let oracle = Oracle::new(&compiler, "unused");
        let files = oracle.generate(&case("conversational-vlm-stream")).unwrap();
        assert!(files.contains_key("0.huggingface_hub.hf-inference.py"));
        assert!(files.contains_key("1.requests.hf-inference.py"));
        assert!(files.contains_key("2.openai.hf-inference.py"));
        assert!(files.contains_key("0.curl.hf-inference.sh"));
        assert!(files.contains_key("0.huggingface.js.hf-inference.js"));
        assert!(files.contains_key("1.openai.hf-inference.js"));
        assert!(!files.keys().any(|name| name.starts_with("0.fetch.")));
        assert!(!files.keys().any(|name| name.contains("fal_client")));
        assert!(files.values().all(|content| !content.ends_with('\n')));
    }

    #[test]
    fn test_unknown_case() {
        assert!(matches!(
            find_case("nope"),
            Err(FixtureError::UnknownCase(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_write_then_check_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Compiler::default();
        let oracle = Oracle::new(&compiler, dir.path());
        let cases = vec![case("automatic-speech-recognition"), case("bill-to-param")];

        let written = oracle.write(&cases).unwrap();
        assert!(written > 0);
        let report = oracle.check(&cases).unwrap();
        assert!(report.is_clean(), "{:?}", report.discrepancies);
        assert_eq!(report.checked, written);
    }

    #[test]
    fn test_check_reports_drift() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Compiler::default();
        let oracle = Oracle::new(&compiler, dir.path());
        let cases = vec![case("automatic-speech-recognition")];
        oracle.write(&cases).unwrap();

        let case_dir = dir.path().join("automatic-speech-recognition");
        let changed = case_dir.join("0.huggingface_hub.hf-inference.py");
        fs::write(&changed, "print('stale')\n").unwrap();
        let missing = case_dir.join("0.curl.hf-inference.sh");
        fs::remove_file(&missing).unwrap();
        let stray = case_dir.join("9.requests.acme.py");
        fs::write(&stray, "").unwrap();

        let report = oracle.check(&cases).unwrap();
        assert!(report.discrepancies.contains(&Discrepancy::Changed(changed)));
        assert!(report.discrepancies.contains(&Discrepancy::Missing(missing)));
        assert!(report.discrepancies.contains(&Discrepancy::Unexpected(stray)));
        assert_eq!(report.discrepancies.len(), 3);
    }

    #[test]
    fn test_write_replaces_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let compiler = Compiler::default();
        let oracle = Oracle::new(&compiler, dir.path());
        let stale = dir.path().join("bill-to-param").join("7.curl.old.sh");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "").unwrap();

        oracle.write(&[case("bill-to-param")]).unwrap();
        assert!(!stale.exists());
    }
}
