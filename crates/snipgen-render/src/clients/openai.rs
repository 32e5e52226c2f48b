//! OpenAI-compatible SDK snippets. Chat completions only.

use snipgen_core::literal::kwargs;
use snipgen_core::{ClientId, Literal, ResolvedRequest, SnippetError};

use crate::python::{credential, data_uri_prelude, Imports};
use crate::traits::{refuse, Renderer};

/// Renders `openai.OpenAI` snippets pointed at the resolved base URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiRenderer;

impl Renderer for OpenAiRenderer {
    fn client(&self) -> ClientId {
        ClientId::OpenAi
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        if !request.task.is_conversational() {
            return Err(refuse(request, "the OpenAI client only serves chat completions"));
        }
        let mut imports = Imports::new();
        imports.third_party("from openai import OpenAI");

        let mut client_args = vec![
            ("base_url".to_string(), Literal::str(request.base_url.clone())),
            (
                "api_key".to_string(),
                credential(&request.credential, &mut imports),
            ),
        ];
        if let Some(org) = &request.bill_to {
            client_args.push((
                "default_headers".to_string(),
                Literal::dict([(request.bill_to_header.clone(), Literal::str(org.clone()))]),
            ));
        }
        let mut sections = vec![format!("client = OpenAI(\n{}\n)", kwargs(&client_args, 4))];
        sections.extend(data_uri_prelude(&request.data_uris, &mut imports));

        let mut call_args = vec![(
            "model".to_string(),
            Literal::str(request.model.alias.to_string()),
        )];
        if let Some(messages) = &request.messages {
            call_args.push(("messages".to_string(), messages.clone()));
        }
        call_args.extend(request.chat.entries());
        if request.streaming {
            call_args.push(("stream".to_string(), Literal::Bool(true)));
            sections.push(format!(
                "stream = client.chat.completions.create(\n{}\n)",
                kwargs(&call_args, 4)
            ));
            sections.push(
                "for chunk in stream:\n    print(chunk.choices[0].delta.content, end=\"\")"
                    .to_string(),
            );
        } else {
            sections.push(format!(
                "completion = client.chat.completions.create(\n{}\n)",
                kwargs(&call_args, 4)
            ));
            sections.push("print(completion.choices[0].message)".to_string());
        }

        let mut out = vec![imports.render()];
        out.extend(sections);
        Ok(out.join("\n\n"))
    }
}
