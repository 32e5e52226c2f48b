//! Task descriptors: the input and output shape of an inference operation.

use serde::Serialize;

use crate::literal::Literal;

/// Coarse grouping used by providers to declare capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskFamily {
    Conversational,
    TextGeneration,
    Classification,
    Embedding,
    BinaryInput,
    GenerativeMedia,
}

impl TaskFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conversational => "conversational",
            Self::TextGeneration => "text-generation",
            Self::Classification => "classification",
            Self::Embedding => "embedding",
            Self::BinaryInput => "binary-input",
            Self::GenerativeMedia => "generative-media",
        }
    }
}

/// What the endpoint sends back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    /// Chat completion object, or a stream of deltas.
    Chat,
    Text,
    Labels,
    Embedding,
    Image,
    Audio,
    Video,
}

impl OutputKind {
    /// Whether the response body is a binary blob rather than JSON.
    pub fn is_media(&self) -> bool {
        matches!(self, Self::Image | Self::Audio | Self::Video)
    }
}

/// How the raw-HTTP body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transport {
    Json,
    /// The file is posted as the request body.
    RawBytes,
    /// The file is base64-encoded into a JSON field.
    Base64Json,
}

/// A sample file referenced by binary tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFile {
    pub path: &'static str,
    pub mime: &'static str,
}

/// Where the file and its companion text live in the `inputs` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePlacement {
    /// `inputs` is an object holding the file under `file_field` and the text beside it.
    Nested { file_field: &'static str },
    /// `inputs` is the file itself; the text goes into `parameters`.
    Parameters,
}

/// Scalar or structured value used in sample inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleValue {
    Text(&'static str),
    TextList(&'static [&'static str]),
    Table(&'static [Column]),
}

/// A named tabular column with string cells.
pub type Column = (&'static str, &'static [&'static str]);

/// A keyed sample field. `sdk_arg` is the keyword the vendor SDK uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleEntry {
    pub key: &'static str,
    pub sdk_arg: &'static str,
    pub value: SampleValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPart {
    Text(&'static str),
    ImageUrl(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageContent {
    Text(&'static str),
    Parts(&'static [ContentPart]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleMessage {
    pub role: &'static str,
    pub content: MessageContent,
}

/// Input modality together with its documentation sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskInput {
    Text(&'static str),
    File(SampleFile),
    FileWithText {
        file: SampleFile,
        placement: FilePlacement,
        text_field: &'static str,
        text: &'static str,
    },
    Messages(&'static [SampleMessage]),
    KeyValue(&'static [SampleEntry]),
    /// Tabular columns, sent as `{"data": {...}}`.
    Table(&'static [Column]),
}

/// An inference task kind. Immutable, defined once in the task registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    /// Identifier used on the command line and in fixture names.
    pub id: &'static str,
    /// Hub pipeline tag the task maps to.
    pub pipeline_tag: &'static str,
    pub family: TaskFamily,
    pub input: TaskInput,
    /// Static `parameters` sent alongside `inputs`.
    pub parameters: &'static [(&'static str, SampleValue)],
    pub output: OutputKind,
    pub transport: Transport,
    /// Method on the vendor SDK client.
    pub sdk_method: &'static str,
    /// Method on the JavaScript SDK client, when it has one for this task.
    pub js_method: Option<&'static str>,
}

impl Task {
    /// The same task with a JavaScript SDK method.
    pub const fn with_js_method(self, method: &'static str) -> Self {
        Self {
            js_method: Some(method),
            ..self
        }
    }

    pub fn is_conversational(&self) -> bool {
        self.family == TaskFamily::Conversational
    }

    /// Relative suffix appended to a custom base URL.
    pub fn endpoint_suffix(&self) -> &'static str {
        if self.is_conversational() {
            "/v1/chat/completions"
        } else {
            ""
        }
    }

    /// The file this task reads, if any.
    pub fn sample_file(&self) -> Option<SampleFile> {
        match self.input {
            TaskInput::File(file) | TaskInput::FileWithText { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Whether the task accepts a binary-input override.
    pub fn has_file_input(&self) -> bool {
        self.sample_file().is_some()
    }

    /// Whether the chat messages carry an image part.
    pub fn has_image_part(&self) -> bool {
        match self.input {
            TaskInput::Messages(messages) => messages.iter().any(|m| match m.content {
                MessageContent::Parts(parts) => {
                    parts.iter().any(|p| matches!(p, ContentPart::ImageUrl(_)))
                }
                MessageContent::Text(_) => false,
            }),
            _ => false,
        }
    }

    /// Prompt-like text: the plain input, or the text paired with a file.
    pub fn prompt_text(&self) -> Option<&'static str> {
        match self.input {
            TaskInput::Text(text) | TaskInput::FileWithText { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The `inputs` value of a JSON payload. `file` replaces the sample path.
    ///
    /// Returns `None` for chat tasks, which send `messages` instead.
    pub fn inputs_literal(&self, file: Option<&str>) -> Option<Literal> {
        match self.input {
            TaskInput::Text(text) => Some(Literal::str(text)),
            TaskInput::File(sample) => Some(Literal::str(file.unwrap_or(sample.path))),
            TaskInput::FileWithText {
                file: sample,
                placement,
                text_field,
                text,
            } => {
                let path = Literal::str(file.unwrap_or(sample.path));
                Some(match placement {
                    FilePlacement::Nested { file_field } => {
                        Literal::dict([(file_field, path), (text_field, Literal::str(text))])
                    }
                    FilePlacement::Parameters => path,
                })
            }
            TaskInput::Messages(_) => None,
            TaskInput::KeyValue(entries) => Some(Literal::dict(
                entries.iter().map(|e| (e.key, sample_literal(&e.value))),
            )),
            TaskInput::Table(columns) => Some(Literal::dict([("data", table_literal(columns))])),
        }
    }

    /// The `parameters` value of a JSON payload, if the task has any.
    pub fn parameters_literal(&self) -> Option<Literal> {
        let mut entries: Vec<(String, Literal)> = self
            .parameters
            .iter()
            .map(|(k, v)| (k.to_string(), sample_literal(v)))
            .collect();
        if let TaskInput::FileWithText {
            placement: FilePlacement::Parameters,
            text_field,
            text,
            ..
        } = self.input
        {
            entries.push((text_field.to_string(), Literal::str(text)));
        }
        if entries.is_empty() {
            None
        } else {
            Some(Literal::Dict(entries))
        }
    }

    /// Path of the base64 field inside the JSON payload.
    pub fn file_field_path(&self) -> Option<Vec<&'static str>> {
        if self.transport != Transport::Base64Json {
            return None;
        }
        match self.input {
            TaskInput::FileWithText {
                placement: FilePlacement::Nested { file_field },
                ..
            } => Some(vec!["inputs", file_field]),
            TaskInput::FileWithText { .. } | TaskInput::File(_) => Some(vec!["inputs"]),
            _ => None,
        }
    }

    /// Chat messages. `image_url` replaces the sample image part (a data URI variable).
    pub fn messages_literal(&self, image_url: Option<&Literal>) -> Option<Literal> {
        let TaskInput::Messages(messages) = self.input else {
            return None;
        };
        Some(Literal::List(
            messages
                .iter()
                .map(|message| {
                    let content = match message.content {
                        MessageContent::Text(text) => Literal::str(text),
                        MessageContent::Parts(parts) => Literal::List(
                            parts
                                .iter()
                                .map(|part| match part {
                                    ContentPart::Text(text) => Literal::dict([
                                        ("type", Literal::str("text")),
                                        ("text", Literal::str(*text)),
                                    ]),
                                    ContentPart::ImageUrl(url) => Literal::dict([
                                        ("type", Literal::str("image_url")),
                                        (
                                            "image_url",
                                            Literal::dict([(
                                                "url",
                                                image_url
                                                    .cloned()
                                                    .unwrap_or_else(|| Literal::str(*url)),
                                            )]),
                                        ),
                                    ]),
                                })
                                .collect(),
                        ),
                    };
                    Literal::dict([("role", Literal::str(message.role)), ("content", content)])
                })
                .collect(),
        ))
    }

    /// Keyword arguments for the vendor SDK call, excluding the positional input.
    pub fn sdk_kwargs(&self) -> Vec<(String, Literal)> {
        let mut kwargs = Vec::new();
        match self.input {
            TaskInput::KeyValue(entries) => {
                for entry in entries {
                    kwargs.push((entry.sdk_arg.to_string(), sample_literal(&entry.value)));
                }
            }
            TaskInput::Table(columns) => {
                kwargs.push(("table".to_string(), table_literal(columns)));
            }
            TaskInput::FileWithText {
                text_field, text, ..
            } => kwargs.push((text_field.to_string(), Literal::str(text))),
            _ => {}
        }
        for (key, value) in self.parameters {
            kwargs.push((key.to_string(), sample_literal(value)));
        }
        kwargs
    }
}

/// Literal form of a sample value.
pub fn sample_literal(value: &SampleValue) -> Literal {
    match value {
        SampleValue::Text(text) => Literal::str(*text),
        SampleValue::TextList(items) => Literal::str_list(items),
        SampleValue::Table(columns) => table_literal(columns),
    }
}

fn table_literal(columns: &[Column]) -> Literal {
    Literal::dict(
        columns
            .iter()
            .map(|(name, cells)| (*name, Literal::str_list(cells))),
    )
}
