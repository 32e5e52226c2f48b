//! Vendor SDK snippets using `@huggingface/inference`.

use snipgen_core::literal::quote;
use snipgen_core::{ClientId, Dialect, Literal, ResolvedRequest, SnippetError};

use crate::js::{credential, data_uri_prelude, media_noun, object, Imports, FS_IMPORT};
use crate::traits::{refuse, Renderer};

const SDK_IMPORT: &str = r#"import { InferenceClient } from "@huggingface/inference";"#;

const STREAM_LOOP: &str = r#"for await (const chunk of stream) {
    if (chunk.choices && chunk.choices.length > 0) {
        const newContent = chunk.choices[0].delta.content;
        out += newContent;
        console.log(newContent);
    }
}"#;

/// Renders `InferenceClient` calls for JavaScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuggingFaceJsRenderer;

impl HuggingFaceJsRenderer {
    fn constructor(&self, request: &ResolvedRequest) -> String {
        let token = credential(&request.credential).render(Dialect::Js);
        match &request.custom_base_url {
            Some(base) => format!(
                "const client = new InferenceClient({token}, {});",
                object(&[("endpointUrl".to_string(), Literal::str(base.clone()))], 0)
            ),
            None => format!("const client = new InferenceClient({token});"),
        }
    }

    /// `provider` and `model`, the leading arguments of every call.
    fn routing_args(&self, request: &ResolvedRequest) -> Vec<(String, Literal)> {
        let mut args = Vec::new();
        let model = if request.explicit_provider {
            if request.custom_base_url.is_none() {
                args.push(("provider".to_string(), Literal::str(request.provider.clone())));
            }
            request.model.canonical.clone()
        } else {
            request.model.as_given.clone()
        };
        args.push(("model".to_string(), Literal::str(model)));
        args
    }

    /// Argument list; billing travels in the call options.
    fn call_args(&self, request: &ResolvedRequest, args: &[(String, Literal)]) -> String {
        match &request.bill_to {
            Some(org) => format!(
                "{}, {}",
                object(args, 0),
                object(&[("billTo".to_string(), Literal::str(org.clone()))], 0)
            ),
            None => object(args, 0),
        }
    }

    fn chat(&self, request: &ResolvedRequest) -> Vec<String> {
        let mut args = self.routing_args(request);
        if let Some(messages) = &request.messages {
            args.push(("messages".to_string(), messages.clone()));
        }
        args.extend(request.chat.entries());
        let call_args = self.call_args(request, &args);
        if request.streaming {
            vec![
                "let out = \"\";".to_string(),
                format!("const stream = client.chatCompletionStream({call_args});"),
                STREAM_LOOP.to_string(),
            ]
        } else {
            vec![
                format!("const chatCompletion = await client.chatCompletion({call_args});"),
                "console.log(chatCompletion.choices[0].message);".to_string(),
            ]
        }
    }

    fn task_call(
        &self,
        request: &ResolvedRequest,
        method: &str,
        imports: &mut Imports,
    ) -> Vec<String> {
        let task = request.task;
        let mut args = self.routing_args(request);
        match (task.has_file_input(), &request.input_file) {
            (true, Some(file)) => {
                imports.add(FS_IMPORT);
                args.push((
                    "data".to_string(),
                    Literal::expr(format!("fs.readFileSync({})", quote(&file.path))),
                ));
            }
            _ => {
                if let Some(inputs) = task.inputs_literal(None) {
                    args.push(("inputs".to_string(), inputs));
                }
            }
        }
        if let Some(parameters) = task.parameters_literal() {
            args.push(("parameters".to_string(), parameters));
        }
        let call_args = self.call_args(request, &args);
        match media_noun(task.output) {
            Some(noun) => vec![
                format!("const {noun} = await client.{method}({call_args});"),
                format!("// Use the generated {noun} (it's a Blob)"),
            ],
            None => vec![
                format!("const output = await client.{method}({call_args});"),
                "console.log(output);".to_string(),
            ],
        }
    }
}

impl Renderer for HuggingFaceJsRenderer {
    fn client(&self) -> ClientId {
        ClientId::HuggingFaceJs
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        if request.bind_model {
            return Err(refuse(request, "huggingface.js does not bind a model to the client"));
        }
        let mut imports = Imports::new();
        imports.add(SDK_IMPORT);

        let mut sections = vec![self.constructor(request)];
        if request.task.is_conversational() {
            sections.extend(data_uri_prelude(&request.data_uris, &mut imports));
            sections.extend(self.chat(request));
        } else {
            let method = request
                .task
                .js_method
                .ok_or_else(|| refuse(request, "huggingface.js has no method for this task"))?;
            sections.extend(self.task_call(request, method, &mut imports));
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

    fn render(task: &str, provider: &str, model: &str, variant: &Variant) -> String {
        let request = resolve(task, provider, model, ClientId::HuggingFaceJs, variant);
        HuggingFaceJsRenderer.render(&request).unwrap()
    }

    #[test]
    fn test_chat_completion() {
        let out = render(
            "conversational",
            "together",
            "meta-llama/Llama-3.1-8B-Instruct",
            &Variant::new(),
        );
        assert_eq!(
            out,
            "import { InferenceClient } from \"@huggingface/inference\";\n\nconst client = new InferenceClient(\"api_token\");\n\nconst chatCompletion = await client.chatCompletion({\n    provider: \"together\",\n    model: \"meta-llama/Llama-3.1-8B-Instruct\",\n    messages: [\n        {\n            role: \"user\",\n            content: \"What is the capital of France?\",\n        },\n    ],\n    max_tokens: 500,\n});\n\nconsole.log(chatCompletion.choices[0].message);"
        );
    }

    #[test]
    fn test_streaming_and_billing() {
        let variant = Variant::new()
            .with_streaming(true)
            .with_bill_to("huggingface");
        let out = render("conversational", "auto", "org/m", &variant);
        assert!(out.contains("let out = \"\";\n\nconst stream = client.chatCompletionStream({\n    model: \"org/m\",\n"));
        assert!(out.contains("    max_tokens: 500,\n}, {\n    billTo: \"huggingface\",\n});"));
        assert!(!out.contains("provider:"));
        assert!(!out.contains("stream: true"));
        assert!(out.ends_with("        console.log(newContent);\n    }\n}"));
    }

    #[test]
    fn test_file_task_reads_data() {
        let out = render(
            "automatic-speech-recognition",
            "hf-inference",
            "openai/whisper-large-v3",
            &Variant::new().with_token(TokenSource::RequiredEnv { var: None }),
        );
        assert!(out.starts_with("import { InferenceClient } from \"@huggingface/inference\";\nimport fs from \"fs\";\n\n"));
        assert!(out.contains("new InferenceClient(process.env.HF_TOKEN);"));
        assert!(out.contains("const output = await client.automaticSpeechRecognition({\n    provider: \"hf-inference\",\n    model: \"openai/whisper-large-v3\",\n    data: fs.readFileSync(\"sample1.flac\"),\n});"));
        assert!(out.ends_with("console.log(output);"));
    }

    #[test]
    fn test_media_output_is_a_blob() {
        let out = render(
            "text-to-image",
            "hf-inference",
            "black-forest-labs/FLUX.1-dev",
            &Variant::new(),
        );
        assert!(out.contains("const image = await client.textToImage({\n"));
        assert!(out.contains("    inputs: \"Astronaut riding a horse\",\n});"));
        assert!(out.ends_with("// Use the generated image (it's a Blob)"));
    }

    #[test]
    fn test_custom_endpoint() {
        let out = render(
            "text-classification",
            "hf-inference",
            "org/m",
            &Variant::new().with_base_url("http://localhost:8080"),
        );
        assert!(out.contains(
            "const client = new InferenceClient(\"api_token\", {\n    endpointUrl: \"http://localhost:8080\",\n});"
        ));
        assert!(!out.contains("provider:"));
    }

    #[test]
    fn test_task_without_method_refused() {
        let request = resolve(
            "object-detection",
            "hf-inference",
            "facebook/detr-resnet-50",
            ClientId::HuggingFaceJs,
            &Variant::new(),
        );
        assert!(HuggingFaceJsRenderer.render(&request).unwrap_err().is_unsupported());
    }

    #[test]
    fn test_bound_model_refused() {
        let request = resolve(
            "conversational",
            "auto",
            "org/m",
            ClientId::HuggingFaceJs,
            &Variant::new().with_bound_model(true),
        );
        assert!(HuggingFaceJsRenderer.render(&request).unwrap_err().is_unsupported());
    }
}
