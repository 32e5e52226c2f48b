//! Vendor SDK snippets using `huggingface_hub.InferenceClient`.

use snipgen_core::literal::{kwargs, quote};
use snipgen_core::{
    ClientId, Dialect, Literal, OutputKind, ResolvedRequest, SnippetError, TaskInput,
};

use crate::python::{credential, data_uri_prelude, output_var, Imports};
use crate::traits::Renderer;

/// Renders `InferenceClient` snippets; one task method per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuggingFaceHubRenderer;

impl HuggingFaceHubRenderer {
    /// Model id passed to the SDK.
    fn model(request: &ResolvedRequest) -> String {
        if request.explicit_provider {
            request.model.canonical.clone()
        } else {
            request.model.as_given.clone()
        }
    }

    fn constructor(&self, request: &ResolvedRequest, imports: &mut Imports) -> String {
        let mut lines = Vec::new();
        let bind = request.bind_model;
        if bind && !request.explicit_provider {
            lines.push(format!("    {},", quote(&Self::model(request))));
        }
        let mut entries: Vec<(String, Literal)> = Vec::new();
        match &request.custom_base_url {
            Some(base) => entries.push(("base_url".to_string(), Literal::str(base.clone()))),
            None if request.explicit_provider => {
                entries.push(("provider".to_string(), Literal::str(request.provider.clone())))
            }
            None => {}
        }
        if bind && request.explicit_provider {
            entries.push(("model".to_string(), Literal::str(Self::model(request))));
        }
        entries.push(("api_key".to_string(), credential(&request.credential, imports)));
        if let Some(org) = &request.bill_to {
            entries.push(("bill_to".to_string(), Literal::str(org.clone())));
        }
        lines.push(kwargs(&entries, 4));
        format!("client = InferenceClient(\n{}\n)", lines.join("\n"))
    }

    fn chat(&self, request: &ResolvedRequest) -> Vec<String> {
        let mut entries = Vec::new();
        if !request.bind_model {
            entries.push(("model".to_string(), Literal::str(Self::model(request))));
        }
        if let Some(messages) = &request.messages {
            entries.push(("messages".to_string(), messages.clone()));
        }
        entries.extend(request.chat.entries());
        if request.streaming {
            entries.push(("stream".to_string(), Literal::Bool(true)));
            vec![
                format!(
                    "stream = client.chat.completions.create(\n{}\n)",
                    kwargs(&entries, 4)
                ),
                "for chunk in stream:\n    print(chunk.choices[0].delta.content, end=\"\")"
                    .to_string(),
            ]
        } else {
            vec![
                format!(
                    "completion = client.chat.completions.create(\n{}\n)",
                    kwargs(&entries, 4)
                ),
                "print(completion.choices[0].message)".to_string(),
            ]
        }
    }

    fn task_call(&self, request: &ResolvedRequest) -> Vec<String> {
        let task = request.task;
        let positional = match (task.input, &request.input_file) {
            (TaskInput::File(_) | TaskInput::FileWithText { .. }, Some(file)) => {
                Some(quote(&file.path))
            }
            (TaskInput::Text(text), _) => Some(quote(text)),
            _ => None,
        };
        let mut entries = task.sdk_kwargs();
        if !request.bind_model {
            entries.push(("model".to_string(), Literal::str(Self::model(request))));
        }

        let var = output_var(task.output);
        let method = task.sdk_method;
        let inline = task.has_file_input()
            && entries.len() <= 1
            && entries
                .iter()
                .all(|(_, v)| !matches!(v, Literal::List(_) | Literal::Dict(_)));
        let call = if inline {
            let args = positional
                .into_iter()
                .chain(entries.iter().map(|(k, v)| {
                    format!("{k}={}", v.render(Dialect::Python))
                }))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{var} = client.{method}({args})")
        } else {
            let mut lines: Vec<String> = positional.into_iter().map(|p| format!("    {p},")).collect();
            if !entries.is_empty() {
                lines.push(kwargs(&entries, 4));
            }
            format!("{var} = client.{method}(\n{}\n)", lines.join("\n"))
        };

        let mut sections = vec![call];
        if task.output == OutputKind::Image {
            sections.push("# image is a PIL.Image object".to_string());
        }
        sections
    }
}

impl Renderer for HuggingFaceHubRenderer {
    fn client(&self) -> ClientId {
        ClientId::HuggingFaceHub
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        let mut imports = Imports::new();
        imports.third_party("from huggingface_hub import InferenceClient");

        let mut sections = vec![self.constructor(request, &mut imports)];
        // The SDK uploads task files itself; only chat image overrides need a data URI.
        if request.task.is_conversational() {
            sections.extend(data_uri_prelude(&request.data_uris, &mut imports));
            sections.extend(self.chat(request));
        } else {
            sections.extend(self.task_call(request));
        }

        let mut out = vec![imports.render()];
        out.extend(sections);
        Ok(out.join("\n\n"))
    }
}
