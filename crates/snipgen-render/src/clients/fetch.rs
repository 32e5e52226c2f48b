//! Raw HTTP snippets using the Fetch API.

use snipgen_core::literal::quote;
use snipgen_core::{ClientId, ResolvedRequest, ResponseKind, SnippetError, Transport};

use crate::js::{
    data_uri_prelude, header_entries, media_noun, object, property_path, Imports, FS_IMPORT,
};
use crate::traits::{refuse, Renderer};

/// Renders an `async function query` around `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchRenderer;

impl FetchRenderer {
    fn query_fn(&self, request: &ResolvedRequest, imports: &mut Imports) -> String {
        let headers = header_entries(&request.merged_headers());
        let (param, read, body) = match request.transport {
            Transport::RawBytes => {
                imports.add(FS_IMPORT);
                (
                    "filename",
                    Some("    const data = fs.readFileSync(filename);".to_string()),
                    "data",
                )
            }
            Transport::Base64Json => {
                imports.add(FS_IMPORT);
                let field = property_path(
                    "data",
                    &request.task.file_field_path().unwrap_or_else(|| vec!["inputs"]),
                );
                (
                    "data",
                    Some(format!(
                        "    {field} = fs.readFileSync({field}).toString(\"base64\");"
                    )),
                    "JSON.stringify(data)",
                )
            }
            Transport::Json => ("data", None, "JSON.stringify(data)"),
        };
        let decode = match request.response {
            ResponseKind::Bytes => "response.blob()",
            _ => "response.json()",
        };

        let mut lines = vec![format!("async function query({param}) {{")];
        lines.extend(read);
        lines.push(format!(
            "    const response = await fetch(\n        {},\n        {{\n            headers: {},\n            method: \"POST\",\n            body: {body},\n        }}\n    );",
            quote(&request.url),
            object(&headers, 12),
        ));
        lines.push(format!("    const result = await {decode};"));
        lines.push("    return result;".to_string());
        lines.push("}".to_string());
        lines.join("\n")
    }

    fn call(&self, request: &ResolvedRequest) -> String {
        let argument = match (request.transport, &request.input_file) {
            (Transport::RawBytes, Some(file)) => quote(&file.path),
            _ => object(&request.body, 0),
        };
        let handler = if request.task.is_conversational() {
            "    console.log(response.choices[0].message);".to_string()
        } else {
            match (request.response, media_noun(request.task.output)) {
                (ResponseKind::Bytes, Some(noun)) => {
                    format!("    // Use the generated {noun} (it's a Blob)")
                }
                _ => "    console.log(JSON.stringify(response));".to_string(),
            }
        };
        format!("query({argument}).then((response) => {{\n{handler}\n}});")
    }
}

impl Renderer for FetchRenderer {
    fn client(&self) -> ClientId {
        ClientId::Fetch
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        if request.response == ResponseKind::Stream {
            return Err(refuse(request, "fetch snippets do not decode server-sent events"));
        }
        let mut imports = Imports::new();
        let mut sections = vec![self.query_fn(request, &mut imports)];
        sections.extend(data_uri_prelude(&request.data_uris, &mut imports));
        sections.push(self.call(request));

        let mut out = Vec::new();
        if !imports.is_empty() {
            out.push(imports.render());
        }
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
        let request = resolve(task, provider, model, ClientId::Fetch, variant);
        FetchRenderer.render(&request).unwrap()
    }

    #[test]
    fn test_text_classification() {
        let out = render("text-classification", "hf-inference", "org/m", &Variant::new());
        assert_eq!(
            out,
            "async function query(data) {\n    const response = await fetch(\n        \"https://router.huggingface.co/hf-inference/models/org/m\",\n        {\n            headers: {\n                Authorization: \"Bearer api_token\",\n                \"Content-Type\": \"application/json\",\n            },\n            method: \"POST\",\n            body: JSON.stringify(data),\n        }\n    );\n    const result = await response.json();\n    return result;\n}\n\nquery({\n    inputs: \"I like you. I love you\",\n}).then((response) => {\n    console.log(JSON.stringify(response));\n});"
        );
    }

    #[test]
    fn test_raw_bytes_upload() {
        let out = render(
            "automatic-speech-recognition",
            "hf-inference",
            "openai/whisper-large-v3",
            &Variant::new(),
        );
        assert!(out.starts_with("import fs from \"fs\";\n\nasync function query(filename) {\n    const data = fs.readFileSync(filename);\n"));
        assert!(out.contains("                \"Content-Type\": \"audio/flac\",\n"));
        assert!(out.contains("            body: data,\n"));
        assert!(out.ends_with("query(\"sample1.flac\").then((response) => {\n    console.log(JSON.stringify(response));\n});"));
    }

    #[test]
    fn test_base64_field_is_read_in_query() {
        let out = render(
            "document-question-answering",
            "hf-inference",
            "impira/layoutlm-document-qa",
            &Variant::new(),
        );
        assert!(out.contains(
            "    data.inputs.image = fs.readFileSync(data.inputs.image).toString(\"base64\");\n"
        ));
        assert!(out.contains("query({\n    inputs: {\n        image: \"cat.png\",\n        question: \"What is in this image?\",\n    },\n})"));
    }

    #[test]
    fn test_binary_media_uses_blob() {
        let out = render(
            "text-to-image",
            "hf-inference",
            "black-forest-labs/FLUX.1-dev",
            &Variant::new(),
        );
        assert!(out.contains("    const result = await response.blob();\n"));
        assert!(out.ends_with("    // Use the generated image (it's a Blob)\n});"));
    }

    #[test]
    fn test_env_token_and_billing() {
        let variant = Variant::new()
            .with_token(TokenSource::RequiredEnv { var: None })
            .with_bill_to("huggingface");
        let out = render("conversational", "together", "org/m", &variant);
        assert!(out.contains(
            "                Authorization: `Bearer ${process.env.HF_TOKEN}`,\n                \"X-HF-Bill-To\": \"huggingface\",\n"
        ));
        assert!(out.ends_with("    console.log(response.choices[0].message);\n});"));
    }

    #[test]
    fn test_fal_data_uri_prelude() {
        let variant = Variant::new().with_credential(CredentialKind::ProviderKey);
        let out = render(
            "image-to-image",
            "fal-ai",
            "black-forest-labs/FLUX.1-Kontext-dev",
            &variant,
        );
        assert!(out.starts_with("import fs from \"fs\";\n\n"));
        assert!(out.contains("const image_url = `data:image/png;base64,"));
        assert!(out.contains("    image_url: image_url,\n"));
    }

    #[test]
    fn test_streaming_refused() {
        let request = resolve(
            "conversational",
            "together",
            "org/m",
            ClientId::Fetch,
            &Variant::new().with_streaming(true),
        );
        assert!(FetchRenderer.render(&request).unwrap_err().is_unsupported());
    }
}
