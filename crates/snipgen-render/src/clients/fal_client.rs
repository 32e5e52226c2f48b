//! Provider-native SDK snippets using `fal_client`.

use snipgen_core::literal::{dict_entries, quote};
use snipgen_core::{ClientId, Dialect, ResolvedRequest, SnippetError};

use crate::python::{credential, data_uri_prelude, Imports};
use crate::traits::{refuse, Renderer};

const QUEUE_CALLBACK: &str = r#"def on_queue_update(update):
    if isinstance(update, fal_client.InProgress):
        for log in update.logs:
            print(log["message"])"#;

/// Renders `fal_client.SyncClient.subscribe` snippets.
#[derive(Debug, Clone, Copy, Default)]
pub struct FalClientRenderer;

impl Renderer for FalClientRenderer {
    fn client(&self) -> ClientId {
        ClientId::FalClient
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        if !request.direct {
            return Err(refuse(request, "the native SDK always talks to the vendor"));
        }
        let mut imports = Imports::new();
        imports.third_party("import fal_client");

        let key = credential(&request.credential, &mut imports).render(Dialect::Python);
        let mut sections = Vec::new();
        sections.extend(data_uri_prelude(&request.data_uris, &mut imports));
        sections.push(format!("client = fal_client.SyncClient(key={key})"));
        sections.push(QUEUE_CALLBACK.to_string());
        sections.push(format!(
            "result = client.subscribe(\n    {},\n    arguments={{\n{}\n    }},\n    with_logs=True,\n    on_queue_update=on_queue_update,\n)",
            quote(&request.model.alias.to_string()),
            dict_entries(&request.body, Dialect::Python, 8, true),
        ));
        sections.push("print(result)".to_string());

        let mut out = vec![imports.render()];
        out.extend(sections);
        Ok(out.join("\n\n"))
    }
}
