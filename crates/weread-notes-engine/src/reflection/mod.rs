//! # Reflection
//!
//! Asks a chat-completions endpoint for a short critical reflection on one
//! quote and the reader's thought about it.
//!
//! The prompt is the book name, quote and thought followed by a free-text
//! template; the template has no placeholders. One request is made per
//! reflection and failures are reported once, never retried.

pub mod client;
pub mod wire;

pub use client::ReflectionClient;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("请先配置 AI 服务的 API 地址、密钥和模型")]
    NotConfigured,

    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API 请求失败: {status} {body}")]
    Status { status: u16, body: String },

    #[error("无法解析 API 响应: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, ReflectionError>;

/// Where and how to ask for reflections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionConfig {
    pub endpoint_url: String,
    pub api_key: String,
    pub model_name: String,
    pub prompt_template: String,
}

impl ReflectionConfig {
    /// Endpoint, key and model must all be set before any request is made.
    pub fn is_complete(&self) -> bool {
        !self.endpoint_url.is_empty() && !self.api_key.is_empty() && !self.model_name.is_empty()
    }
}

/// The note a reflection is asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionRequest<'a> {
    pub quote: &'a str,
    pub thought: &'a str,
    pub book_name: &'a str,
}

impl ReflectionRequest<'_> {
    pub fn prompt(&self, template: &str) -> String {
        format!(
            "正在阅读：{}\n\n原文：{}\n\n读者想法：{}\n\n{}",
            self.book_name, self.quote, self.thought, template
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_prepends_values_to_template() {
        let request = ReflectionRequest {
            quote: "这是原文内容",
            thought: "这是我的想法",
            book_name: "《示例之书》",
        };

        assert_eq!(
            request.prompt("请谈谈你的思考。"),
            "正在阅读：《示例之书》\n\n原文：这是原文内容\n\n读者想法：这是我的想法\n\n请谈谈你的思考。"
        );
    }

    #[test]
    fn template_braces_are_not_interpolated() {
        let request = ReflectionRequest {
            quote: "q",
            thought: "t",
            book_name: "b",
        };

        assert!(request.prompt("{quote}").ends_with("\n\n{quote}"));
    }

    #[test]
    fn config_completeness() {
        let mut config = ReflectionConfig {
            endpoint_url: "https://example.invalid/v1/chat/completions".into(),
            api_key: "key".into(),
            model_name: "model".into(),
            prompt_template: String::new(),
        };
        assert!(config.is_complete());

        config.api_key.clear();
        assert!(!config.is_complete());
        assert!(!ReflectionConfig::default().is_complete());
    }
}
