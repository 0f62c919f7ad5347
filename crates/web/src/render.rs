//! 描画コラボレータ
//!
//! ハンドラは `Renderer` トレイトにページ種別とコンテキスト（JSON）を渡すだけで、
//! テンプレートエンジンの詳細には依存しません。

use handlebars::{Handlebars, TemplateError};
use serde_json::Value;
use thiserror::Error;

/// 描画対象のページ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    About,
    Calendar,
    Tasks,
    TaskEdit,
    Events,
    EventEdit,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Landing,
        Page::About,
        Page::Calendar,
        Page::Tasks,
        Page::TaskEdit,
        Page::Events,
        Page::EventEdit,
    ];

    pub fn template_name(self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::About => "about",
            Page::Calendar => "calendar",
            Page::Tasks => "tasks",
            Page::TaskEdit => "task_edit",
            Page::Events => "events",
            Page::EventEdit => "event_edit",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Page::Landing => include_str!("../templates/landing.hbs"),
            Page::About => include_str!("../templates/about.hbs"),
            Page::Calendar => include_str!("../templates/calendar.hbs"),
            Page::Tasks => include_str!("../templates/tasks.hbs"),
            Page::TaskEdit => include_str!("../templates/task_edit.hbs"),
            Page::Events => include_str!("../templates/events.hbs"),
            Page::EventEdit => include_str!("../templates/event_edit.hbs"),
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to render {page:?}: {message}")]
pub struct RenderError {
    pub page: Page,
    pub message: String,
}

/// ページを HTML 文字列に描画する抽象
pub trait Renderer: Send + Sync {
    fn render(&self, page: Page, context: &Value) -> Result<String, RenderError>;
}

/// Handlebars によるテンプレート描画（テンプレートはバイナリに埋め込み）
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;
        for page in Page::ALL {
            registry.register_template_string(page.template_name(), page.source())?;
        }
        Ok(Self { registry })
    }
}

impl Renderer for HandlebarsRenderer {
    fn render(&self, page: Page, context: &Value) -> Result<String, RenderError> {
        self.registry
            .render(page.template_name(), context)
            .map_err(|e| RenderError {
                page,
                message: e.to_string(),
            })
    }
}
