//! One renderer per client library.

mod curl;
mod fal_client;
mod fetch;
mod huggingface_hub;
mod huggingface_js;
mod openai;
mod openai_js;
mod requests;

pub use curl::CurlRenderer;
pub use fal_client::FalClientRenderer;
pub use fetch::FetchRenderer;
pub use huggingface_hub::HuggingFaceHubRenderer;
pub use huggingface_js::HuggingFaceJsRenderer;
pub use openai::OpenAiRenderer;
pub use openai_js::OpenAiJsRenderer;
pub use requests::RequestsRenderer;
