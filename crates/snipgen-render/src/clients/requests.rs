//! Raw HTTP snippets using `requests`.

use snipgen_core::literal::{dict_entries, quote};
use snipgen_core::{
    ClientId, Dialect, Literal, ResolvedRequest, ResponseKind, SnippetError, Transport,
};

use crate::python::{
    compact_dict, data_uri_prelude, header_entries, media_usage, output_var, Imports,
};
use crate::traits::Renderer;

const STREAM_QUERY: &str = r#"def query(payload):
    response = requests.post(API_URL, headers=headers, json=payload, stream=True)
    for line in response.iter_lines():
        if not line.startswith(b"data:"):
            continue
        if line.strip() == b"data: [DONE]":
            return
        yield json.loads(line.decode("utf-8").lstrip("data:").rstrip("/n"))"#;

/// Renders `requests` snippets with an explicit URL and headers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestsRenderer;

impl RequestsRenderer {
    fn query_fn(&self, request: &ResolvedRequest, imports: &mut Imports) -> String {
        if request.response == ResponseKind::Stream {
            imports.stdlib("json");
            return STREAM_QUERY.to_string();
        }
        let ret = match request.response {
            ResponseKind::Bytes => "return response.content",
            _ => "return response.json()",
        };
        match request.transport {
            Transport::RawBytes => format!(
                "def query(filename):\n    with open(filename, \"rb\") as f:\n        data = f.read()\n    response = requests.post(API_URL, headers={{{}: {}, **headers}}, data=data)\n    {ret}",
                quote("Content-Type"),
                quote(&request.content_type),
            ),
            Transport::Base64Json => {
                imports.stdlib("base64");
                let field = request
                    .task
                    .file_field_path()
                    .unwrap_or_else(|| vec!["inputs"])
                    .iter()
                    .map(|key| format!("[{}]", quote(key)))
                    .collect::<String>();
                format!(
                    "def query(payload):\n    with open(payload{field}, \"rb\") as f:\n        img = f.read()\n    payload{field} = base64.b64encode(img).decode(\"utf-8\")\n    response = requests.post(API_URL, headers=headers, json=payload)\n    {ret}"
                )
            }
            Transport::Json => format!(
                "def query(payload):\n    response = requests.post(API_URL, headers=headers, json=payload)\n    {ret}"
            ),
        }
    }

    fn payload(&self, body: &[(String, Literal)]) -> String {
        if body.is_empty() {
            return "{}".to_string();
        }
        format!("{{\n{}\n}}", dict_entries(body, Dialect::Python, 4, true))
    }

    fn call(&self, request: &ResolvedRequest) -> Vec<String> {
        let task = request.task;
        if request.response == ResponseKind::Stream {
            return vec![
                format!("chunks = query({})", self.payload(&request.body)),
                "for chunk in chunks:\n    print(chunk[\"choices\"][0][\"delta\"][\"content\"], end=\"\")"
                    .to_string(),
            ];
        }
        if task.is_conversational() {
            return vec![
                format!("response = query({})", self.payload(&request.body)),
                "print(response[\"choices\"][0][\"message\"])".to_string(),
            ];
        }
        let argument = match (request.transport, &request.input_file) {
            (Transport::RawBytes, Some(file)) => quote(&file.path),
            _ => self.payload(&request.body),
        };
        if request.response == ResponseKind::Bytes {
            let var = format!("{}_bytes", output_var(task.output));
            let mut sections = vec![format!("{var} = query({argument})")];
            sections.extend(media_usage(task.output, &var));
            sections
        } else {
            vec![format!("output = query({argument})")]
        }
    }
}

impl Renderer for RequestsRenderer {
    fn client(&self) -> ClientId {
        ClientId::Requests
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        let mut imports = Imports::new();
        imports.third_party("import requests");

        let headers = header_entries(&request.headers, &mut imports);
        let mut sections = vec![format!(
            "API_URL = {}\nheaders = {}",
            quote(&request.url),
            compact_dict(&headers, 0)
        )];
        sections.push(self.query_fn(request, &mut imports));
        sections.extend(data_uri_prelude(&request.data_uris, &mut imports));
        sections.extend(self.call(request));

        let mut out = vec![imports.render()];
        out.extend(sections);
        Ok(out.join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::resolve;
    use snipgen_core::{CredentialKind, TokenSource, Variant};

    fn render(task: &str, provider: &str, model: &str, variant: &Variant) -> String {
        let request = resolve(task, provider, model, ClientId::Requests, variant);
        RequestsRenderer.render(&request).unwrap()
    }

    #[test]
    fn test_chat_without_streaming() {
        let out = render(
            "conversational",
            "hf-inference",
            "meta-llama/Llama-3.1-8B-Instruct",
            &Variant::new(),
        );
        assert!(out.starts_with("import requests\n\nAPI_URL = "));
        assert!(out.contains("response = query({\n    \"model\": \"meta-llama/Llama-3.1-8B-Instruct\",\n"));
        assert!(out.ends_with("print(response[\"choices\"][0][\"message\"])"));
        assert!(!out.contains("import json"));
    }

    #[test]
    fn test_stream_decoder_guards_sentinel() {
        let out = render(
            "conversational",
            "together",
            "meta-llama/Llama-3.1-8B-Instruct",
            &Variant::new().with_streaming(true),
        );
        let sentinel = out.find("b\"data: [DONE]\"").unwrap();
        let decode = out.find("json.loads").unwrap();
        assert!(sentinel < decode);
        assert!(out.starts_with("import json\nimport requests\n"));
        assert!(out.contains("    \"stream\": True,\n})"));
    }

    #[test]
    fn test_raw_bytes_upload() {
        let out = render(
            "automatic-speech-recognition",
            "hf-inference",
            "openai/whisper-large-v3",
            &Variant::new(),
        );
        assert!(out.contains("def query(filename):"));
        assert!(out.contains("headers={\"Content-Type\": \"audio/flac\", **headers}, data=data)"));
        assert!(out.ends_with("output = query(\"sample1.flac\")"));
        assert!(!out.contains("base64"));
    }

    #[test]
    fn test_base64_field_path() {
        let out = render(
            "document-question-answering",
            "hf-inference",
            "impira/layoutlm-document-qa",
            &Variant::new(),
        );
        assert!(out.starts_with("import base64\nimport requests\n"));
        assert!(out.contains("with open(payload[\"inputs\"][\"image\"], \"rb\") as f:"));
        assert!(out.contains(
            "payload[\"inputs\"][\"image\"] = base64.b64encode(img).decode(\"utf-8\")"
        ));
        assert!(!out.contains("data=data"));
    }

    #[test]
    fn test_binary_image_output() {
        let out = render(
            "text-to-image",
            "hf-inference",
            "black-forest-labs/FLUX.1-dev",
            &Variant::new(),
        );
        assert!(out.contains("    return response.content"));
        assert!(out.contains("image_bytes = query({\n    \"inputs\": \"Astronaut riding a horse\",\n})"));
        assert!(out.ends_with("image = Image.open(io.BytesIO(image_bytes))"));
    }

    #[test]
    fn test_env_token_and_billing_headers() {
        let variant = Variant::new()
            .with_token(TokenSource::RequiredEnv { var: None })
            .with_bill_to("huggingface");
        let out = render(
            "conversational",
            "hf-inference",
            "meta-llama/Llama-3.1-8B-Instruct",
            &variant,
        );
        assert!(out.starts_with("import os\nimport requests\n"));
        assert!(out.contains(
            "headers = {\n    \"Authorization\": f\"Bearer {os.environ['HF_TOKEN']}\",\n    \"X-HF-Bill-To\": \"huggingface\",\n}"
        ));
        assert_eq!(out.matches("Authorization").count(), 1);
    }

    #[test]
    fn test_fal_image_to_image_inlines_data_uri() {
        let variant = Variant::new().with_credential(CredentialKind::ProviderKey);
        let out = render(
            "image-to-image",
            "fal-ai",
            "black-forest-labs/FLUX.1-Kontext-dev",
            &variant,
        );
        assert!(out.contains("headers = {\"Authorization\": \"Key api_token\"}"));
        assert!(out.contains("image_url = f\"data:image/png;base64,{image_data}\""));
        assert!(out.contains("    \"image_url\": image_url,\n"));
    }
}
