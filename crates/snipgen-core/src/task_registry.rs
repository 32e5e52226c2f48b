//! Built-in task registry.

use crate::error::SnippetError;
use crate::task::{
    Column, ContentPart, FilePlacement, MessageContent, OutputKind, SampleEntry, SampleFile,
    SampleMessage, SampleValue, Task, TaskFamily, TaskInput, Transport,
};

const FLAC: SampleFile = SampleFile {
    path: "sample1.flac",
    mime: "audio/flac",
};
const CATS: SampleFile = SampleFile {
    path: "cats.jpg",
    mime: "image/jpeg",
};
const CAT_PNG: SampleFile = SampleFile {
    path: "cat.png",
    mime: "image/png",
};

const CHAT_MESSAGES: &[SampleMessage] = &[SampleMessage {
    role: "user",
    content: MessageContent::Text("What is the capital of France?"),
}];

const VLM_MESSAGES: &[SampleMessage] = &[SampleMessage {
    role: "user",
    content: MessageContent::Parts(&[
        ContentPart::Text("Describe this image in one sentence."),
        ContentPart::ImageUrl(
            "https://cdn.britannica.com/61/93061-050-99147DCE/Statue-of-Liberty-Island-New-York-Bay.jpg",
        ),
    ]),
}];

const REPO_TABLE: &[Column] = &[
    ("Repository", &["Transformers", "Datasets", "Tokenizers"]),
    ("Stars", &["36542", "4512", "3934"]),
    ("Contributors", &["651", "77", "34"]),
    (
        "Programming language",
        &["Python", "Python", "Rust, Python and NodeJS"],
    ),
];

const FISH_TABLE: &[Column] = &[
    ("Height", &["11.52", "12.48", "12.3778"]),
    ("Length1", &["23.2", "24", "23.9"]),
    ("Length2", &["25.4", "26.3", "26.5"]),
    ("Species", &["Bream", "Bream", "Bream"]),
];

const fn text_task(
    id: &'static str,
    family: TaskFamily,
    text: &'static str,
    output: OutputKind,
    sdk_method: &'static str,
) -> Task {
    Task {
        id,
        pipeline_tag: id,
        family,
        input: TaskInput::Text(text),
        parameters: &[],
        output,
        transport: Transport::Json,
        sdk_method,
        js_method: None,
    }
}

const fn file_task(
    id: &'static str,
    file: SampleFile,
    output: OutputKind,
    sdk_method: &'static str,
) -> Task {
    Task {
        id,
        pipeline_tag: id,
        family: TaskFamily::BinaryInput,
        input: TaskInput::File(file),
        parameters: &[],
        output,
        transport: Transport::RawBytes,
        sdk_method,
        js_method: None,
    }
}

const BUILTIN_TASKS: &[Task] = &[
    Task {
        id: "conversational",
        pipeline_tag: "text-generation",
        family: TaskFamily::Conversational,
        input: TaskInput::Messages(CHAT_MESSAGES),
        parameters: &[],
        output: OutputKind::Chat,
        transport: Transport::Json,
        sdk_method: "chat.completions.create",
        js_method: None,
    },
    Task {
        id: "conversational-vlm",
        pipeline_tag: "image-text-to-text",
        family: TaskFamily::Conversational,
        input: TaskInput::Messages(VLM_MESSAGES),
        parameters: &[],
        output: OutputKind::Chat,
        transport: Transport::Json,
        sdk_method: "chat.completions.create",
        js_method: None,
    },
    text_task(
        "text-generation",
        TaskFamily::TextGeneration,
        "Can you please let us know more details about your ",
        OutputKind::Text,
        "text_generation",
    )
    .with_js_method("textGeneration"),
    text_task(
        "summarization",
        TaskFamily::TextGeneration,
        "The tower is 324 metres (1,063 ft) tall, about the same height as an 81-storey building, and the tallest structure in Paris.",
        OutputKind::Text,
        "summarization",
    )
    .with_js_method("summarization"),
    text_task(
        "translation",
        TaskFamily::TextGeneration,
        "Меня зовут Вольфганг и я живу в Берлине",
        OutputKind::Text,
        "translation",
    )
    .with_js_method("translation"),
    text_task(
        "text2text-generation",
        TaskFamily::TextGeneration,
        "The answer to the universe is",
        OutputKind::Text,
        "text_generation",
    )
    .with_js_method("textGeneration"),
    text_task(
        "fill-mask",
        TaskFamily::TextGeneration,
        "The answer to the universe is [MASK].",
        OutputKind::Labels,
        "fill_mask",
    )
    .with_js_method("fillMask"),
    Task {
        id: "question-answering",
        pipeline_tag: "question-answering",
        family: TaskFamily::TextGeneration,
        input: TaskInput::KeyValue(&[
            SampleEntry {
                key: "question",
                sdk_arg: "question",
                value: SampleValue::Text("What is my name?"),
            },
            SampleEntry {
                key: "context",
                sdk_arg: "context",
                value: SampleValue::Text("My name is Clara and I live in Berkeley."),
            },
        ]),
        parameters: &[],
        output: OutputKind::Text,
        transport: Transport::Json,
        sdk_method: "question_answering",
        js_method: Some("questionAnswering"),
    },
    Task {
        id: "table-question-answering",
        pipeline_tag: "table-question-answering",
        family: TaskFamily::TextGeneration,
        input: TaskInput::KeyValue(&[
            SampleEntry {
                key: "query",
                sdk_arg: "query",
                value: SampleValue::Text("How many stars does the transformers repository have?"),
            },
            SampleEntry {
                key: "table",
                sdk_arg: "table",
                value: SampleValue::Table(REPO_TABLE),
            },
        ]),
        parameters: &[],
        output: OutputKind::Text,
        transport: Transport::Json,
        sdk_method: "table_question_answering",
        js_method: Some("tableQuestionAnswering"),
    },
    text_task(
        "text-classification",
        TaskFamily::Classification,
        "I like you. I love you",
        OutputKind::Labels,
        "text_classification",
    )
    .with_js_method("textClassification"),
    text_task(
        "token-classification",
        TaskFamily::Classification,
        "My name is Sarah Jessica Parker but you can call me Jessica",
        OutputKind::Labels,
        "token_classification",
    )
    .with_js_method("tokenClassification"),
    Task {
        id: "zero-shot-classification",
        pipeline_tag: "zero-shot-classification",
        family: TaskFamily::Classification,
        input: TaskInput::Text(
            "Hi, I recently bought a device from your company but it is not working as advertised and I would like to get reimbursed!",
        ),
        parameters: &[(
            "candidate_labels",
            SampleValue::TextList(&["refund", "legal", "faq"]),
        )],
        output: OutputKind::Labels,
        transport: Transport::Json,
        sdk_method: "zero_shot_classification",
        js_method: None,
    },
    Task {
        id: "tabular-classification",
        pipeline_tag: "tabular-classification",
        family: TaskFamily::Classification,
        input: TaskInput::Table(FISH_TABLE),
        parameters: &[],
        output: OutputKind::Labels,
        transport: Transport::Json,
        sdk_method: "tabular_classification",
        js_method: None,
    },
    Task {
        id: "tabular-regression",
        pipeline_tag: "tabular-regression",
        family: TaskFamily::Classification,
        input: TaskInput::Table(FISH_TABLE),
        parameters: &[],
        output: OutputKind::Labels,
        transport: Transport::Json,
        sdk_method: "tabular_regression",
        js_method: None,
    },
    text_task(
        "feature-extraction",
        TaskFamily::Embedding,
        "Today is a sunny day and I will get some ice cream.",
        OutputKind::Embedding,
        "feature_extraction",
    )
    .with_js_method("featureExtraction"),
    Task {
        id: "sentence-similarity",
        pipeline_tag: "sentence-similarity",
        family: TaskFamily::Embedding,
        input: TaskInput::KeyValue(&[
            SampleEntry {
                key: "source_sentence",
                sdk_arg: "sentence",
                value: SampleValue::Text("That is a happy person"),
            },
            SampleEntry {
                key: "sentences",
                sdk_arg: "other_sentences",
                value: SampleValue::TextList(&[
                    "That is a happy dog",
                    "That is a very happy person",
                    "Today is a sunny day",
                ]),
            },
        ]),
        parameters: &[],
        output: OutputKind::Embedding,
        transport: Transport::Json,
        sdk_method: "sentence_similarity",
        js_method: Some("sentenceSimilarity"),
    },
    file_task(
        "automatic-speech-recognition",
        FLAC,
        OutputKind::Text,
        "automatic_speech_recognition",
    )
    .with_js_method("automaticSpeechRecognition"),
    file_task(
        "audio-classification",
        FLAC,
        OutputKind::Labels,
        "audio_classification",
    ),
    file_task("audio-to-audio", FLAC, OutputKind::Labels, "audio_to_audio"),
    file_task(
        "image-classification",
        CATS,
        OutputKind::Labels,
        "image_classification",
    )
    .with_js_method("imageClassification"),
    Task {
        id: "zero-shot-image-classification",
        pipeline_tag: "zero-shot-image-classification",
        family: TaskFamily::BinaryInput,
        input: TaskInput::File(CATS),
        parameters: &[(
            "candidate_labels",
            SampleValue::TextList(&["cat", "dog", "llama"]),
        )],
        output: OutputKind::Labels,
        transport: Transport::Base64Json,
        sdk_method: "zero_shot_image_classification",
        js_method: None,
    },
    file_task("object-detection", CATS, OutputKind::Labels, "object_detection"),
    file_task(
        "image-segmentation",
        CATS,
        OutputKind::Labels,
        "image_segmentation",
    ),
    file_task("image-to-text", CATS, OutputKind::Text, "image_to_text"),
    Task {
        id: "document-question-answering",
        pipeline_tag: "document-question-answering",
        family: TaskFamily::BinaryInput,
        input: TaskInput::FileWithText {
            file: CAT_PNG,
            placement: FilePlacement::Nested {
                file_field: "image",
            },
            text_field: "question",
            text: "What is in this image?",
        },
        parameters: &[],
        output: OutputKind::Text,
        transport: Transport::Base64Json,
        sdk_method: "document_question_answering",
        js_method: None,
    },
    Task {
        id: "image-to-image",
        pipeline_tag: "image-to-image",
        family: TaskFamily::GenerativeMedia,
        input: TaskInput::FileWithText {
            file: CAT_PNG,
            placement: FilePlacement::Parameters,
            text_field: "prompt",
            text: "Turn the cat into a tiger.",
        },
        parameters: &[],
        output: OutputKind::Image,
        transport: Transport::Base64Json,
        sdk_method: "image_to_image",
        js_method: None,
    },
    text_task(
        "text-to-image",
        TaskFamily::GenerativeMedia,
        "Astronaut riding a horse",
        OutputKind::Image,
        "text_to_image",
    )
    .with_js_method("textToImage"),
    text_task(
        "text-to-video",
        TaskFamily::GenerativeMedia,
        "A young man walking on the street",
        OutputKind::Video,
        "text_to_video",
    )
    .with_js_method("textToVideo"),
    text_task(
        "text-to-speech",
        TaskFamily::GenerativeMedia,
        "The answer to the universe is 42",
        OutputKind::Audio,
        "text_to_speech",
    ),
    text_task(
        "text-to-audio",
        TaskFamily::GenerativeMedia,
        "liquid drum and bass, atmospheric synths, airy sounds",
        OutputKind::Audio,
        "text_to_speech",
    ),
];

/// Registry over built-in tasks.
pub struct TaskRegistry;

impl TaskRegistry {
    /// Returns all built-in tasks in registration order.
    pub fn builtins() -> &'static [Task] {
        BUILTIN_TASKS
    }

    /// Returns the named task if it exists.
    pub fn get(id: &str) -> Option<&'static Task> {
        BUILTIN_TASKS
            .iter()
            .find(|task| task.id.eq_ignore_ascii_case(id))
    }

    /// Look up a task, failing with [`SnippetError::UnknownTask`].
    pub fn lookup(id: &str) -> Result<&'static Task, SnippetError> {
        Self::get(id).ok_or_else(|| SnippetError::UnknownTask(id.to_string()))
    }

    /// Returns the tasks of one family.
    pub fn by_family(family: TaskFamily) -> Vec<&'static Task> {
        BUILTIN_TASKS
            .iter()
            .filter(|task| task.family == family)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskRegistry;
    use crate::error::SnippetError;
    use crate::task::{TaskFamily, Transport};

    #[test]
    fn test_lookup_known_task() {
        let task = TaskRegistry::lookup("automatic-speech-recognition").unwrap();
        assert_eq!(task.transport, Transport::RawBytes);
        assert_eq!(task.sample_file().unwrap().mime, "audio/flac");
    }

    #[test]
    fn test_lookup_unknown_task() {
        let err = TaskRegistry::lookup("telepathy").unwrap_err();
        assert_eq!(err, SnippetError::UnknownTask("telepathy".to_string()));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = TaskRegistry::builtins().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(before, ids.len());
    }

    #[test]
    fn test_conversational_family() {
        let ids: Vec<_> = TaskRegistry::by_family(TaskFamily::Conversational)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["conversational", "conversational-vlm"]);
    }

    #[test]
    fn test_zero_shot_image_classification_sends_labels() {
        let task = TaskRegistry::lookup("zero-shot-image-classification").unwrap();
        assert_eq!(task.transport, Transport::Base64Json);
        assert_eq!(task.file_field_path(), Some(vec!["inputs"]));
        let params = task.parameters_literal().unwrap();
        assert!(params.get("candidate_labels").is_some());
    }

    #[test]
    fn test_js_methods_follow_sdk_table() {
        let js = |id: &str| TaskRegistry::lookup(id).unwrap().js_method;
        assert_eq!(js("text2text-generation"), Some("textGeneration"));
        assert_eq!(js("automatic-speech-recognition"), Some("automaticSpeechRecognition"));
        assert_eq!(js("object-detection"), None);
        assert_eq!(js("conversational"), None);
    }

    #[test]
    fn test_base64_tasks_have_a_file() {
        for task in TaskRegistry::builtins() {
            if task.transport != Transport::Json {
                assert!(task.has_file_input(), "{} has no sample file", task.id);
            }
        }
    }
}
