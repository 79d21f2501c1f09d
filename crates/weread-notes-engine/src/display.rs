//! Text shown around a formatting run and a reflection, independent of how a
//! front end draws it.

use std::fmt;

use crate::reflection::ReflectionError;

pub const LOADING_TEXT: &str = "🐌小蜗 正在阅读...";
pub const FORMAT_DONE_NOTICE: &str = "笔记格式化完成！";

/// Confirmation asked before a document is rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmFormat {
    pub heading: &'static str,
    pub message: String,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
}

impl ConfirmFormat {
    pub const UNNAMED_DOCUMENT: &'static str = "未命名文档";

    pub fn for_document(name: Option<&str>) -> Self {
        let name = name
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::UNNAMED_DOCUMENT);
        Self {
            heading: "确认格式化",
            message: format!("是否要格式化文档 \"{name}\"？"),
            cancel_label: "取消",
            confirm_label: "确认格式化",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSection {
    pub title: &'static str,
    pub body: String,
}

/// Outcome of one reflection request, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionPanel {
    Answered(Vec<PanelSection>),
    Failed(String),
}

impl ReflectionPanel {
    pub const QUOTE_TITLE: &'static str = "原文";
    pub const THOUGHT_TITLE: &'static str = "读者想法";
    pub const REFLECTION_TITLE: &'static str = "小蜗思考";
    pub const ERROR_PREFIX: &'static str = "获取 AI 响应时出错：";

    pub fn new(quote: &str, thought: &str, result: &Result<String, ReflectionError>) -> Self {
        let reflection = match result {
            Ok(text) => text,
            Err(err) => return Self::Failed(format!("{}{err}", Self::ERROR_PREFIX)),
        };

        let mut sections = vec![PanelSection {
            title: Self::QUOTE_TITLE,
            body: quote.replacen('🐌', "", 1).trim().to_string(),
        }];
        if !thought.is_empty() {
            sections.push(PanelSection {
                title: Self::THOUGHT_TITLE,
                body: thought.to_string(),
            });
        }
        sections.push(PanelSection {
            title: Self::REFLECTION_TITLE,
            body: reflection.clone(),
        });
        Self::Answered(sections)
    }
}

impl fmt::Display for ReflectionPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "{message}"),
            Self::Answered(sections) => {
                for (i, section) in sections.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "【{}】", section.title)?;
                    writeln!(f, "{}", section.body)?;
                }
                Ok(())
            }
        }
    }
}
