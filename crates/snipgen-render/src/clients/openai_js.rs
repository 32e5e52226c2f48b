//! OpenAI-compatible SDK snippets for JavaScript. Chat completions only.

use snipgen_core::{ClientId, Literal, ResolvedRequest, SnippetError};

use crate::js::{credential, data_uri_prelude, object, Imports};
use crate::traits::{refuse, Renderer};

const STREAM_LOOP: &str = r#"for await (const chunk of stream) {
    process.stdout.write(chunk.choices[0]?.delta?.content || "");
}"#;

/// Renders `new OpenAI({ baseURL })` snippets pointed at the resolved base URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiJsRenderer;

impl Renderer for OpenAiJsRenderer {
    fn client(&self) -> ClientId {
        ClientId::OpenAiJs
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        if !request.task.is_conversational() {
            return Err(refuse(request, "the OpenAI client only serves chat completions"));
        }
        let mut imports = Imports::new();
        imports.add(r#"import { OpenAI } from "openai";"#);

        let mut options = vec![
            ("baseURL".to_string(), Literal::str(request.base_url.clone())),
            ("apiKey".to_string(), credential(&request.credential)),
        ];
        if let Some(org) = &request.bill_to {
            options.push((
                "defaultHeaders".to_string(),
                Literal::dict([(request.bill_to_header.clone(), Literal::str(org.clone()))]),
            ));
        }
        let mut sections = vec![format!("const client = new OpenAI({});", object(&options, 0))];
        sections.extend(data_uri_prelude(&request.data_uris, &mut imports));

        let mut args = vec![(
            "model".to_string(),
            Literal::str(request.model.alias.to_string()),
        )];
        if let Some(messages) = &request.messages {
            args.push(("messages".to_string(), messages.clone()));
        }
        args.extend(request.chat.entries());
        if request.streaming {
            args.push(("stream".to_string(), Literal::Bool(true)));
            sections.push(format!(
                "const stream = await client.chat.completions.create({});",
                object(&args, 0)
            ));
            sections.push(STREAM_LOOP.to_string());
        } else {
            sections.push(format!(
                "const chatCompletion = await client.chat.completions.create({});",
                object(&args, 0)
            ));
            sections.push("console.log(chatCompletion.choices[0].message);".to_string());
        }

        let mut out = vec![imports.render()];
        out.extend(sections);
        Ok(out.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::resolve;
    use snipgen_core::{TokenSource, Variant};

    #[test]
    fn test_streaming_through_router() {
        let request = resolve(
            "conversational",
            "together",
            "meta-llama/Llama-3.1-8B-Instruct",
            ClientId::OpenAiJs,
            &Variant::new().with_streaming(true),
        );
        let out = OpenAiJsRenderer.render(&request).unwrap();
        assert!(out.starts_with("import { OpenAI } from \"openai\";\n\nconst client = new OpenAI({\n    baseURL: \"https://router.huggingface.co/together/v1\",\n    apiKey: \"api_token\",\n});"));
        assert!(out.contains("    model: \"<together alias for meta-llama/Llama-3.1-8B-Instruct>\",\n"));
        assert!(out.contains("    max_tokens: 500,\n    stream: true,\n});"));
        assert!(out.ends_with("process.stdout.write(chunk.choices[0]?.delta?.content || \"\");\n}"));
    }

    #[test]
    fn test_billing_default_headers_and_env_key() {
        let variant = Variant::new()
            .with_bill_to("huggingface")
            .with_token(TokenSource::OptionalEnv {
                var: None,
                default: Some("it's".to_string()),
            });
        let request = resolve("conversational", "auto", "org/m", ClientId::OpenAiJs, &variant);
        let out = OpenAiJsRenderer.render(&request).unwrap();
        assert!(out.contains(
            "    apiKey: process.env.HF_TOKEN ?? \"it's\",\n    defaultHeaders: {\n        \"X-HF-Bill-To\": \"huggingface\",\n    },\n});"
        ));
        assert!(out.ends_with("console.log(chatCompletion.choices[0].message);"));
    }

    #[test]
    fn test_sampling_options() {
        let variant = Variant::new().with_temperature(0.5).with_top_p(0.7);
        let request = resolve("conversational", "auto", "org/m", ClientId::OpenAiJs, &variant);
        let out = OpenAiJsRenderer.render(&request).unwrap();
        assert!(out.contains("    temperature: 0.5,\n    max_tokens: 500,\n    top_p: 0.7,\n});"));
    }

    #[test]
    fn test_non_chat_refused() {
        let request = resolve(
            "text-classification",
            "hf-inference",
            "org/m",
            ClientId::Requests,
            &Variant::new(),
        );
        assert!(OpenAiJsRenderer.render(&request).unwrap_err().is_unsupported());
    }
}
