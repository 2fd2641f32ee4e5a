//! The display area views write into.
//!
//! A `Screen` is either showing the login view or the main view. The main
//! view holds an ordered list of blocks; every render routine clears it first.

use core::fmt;

use owo_colors::OwoColorize;

use crate::form::StockFormView;
use crate::table::Table;

/// Which of the two top-level views is visible.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ScreenMode {
    #[default]
    Login,
    Main,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Inline notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Table(Table),
    Notice(Notification),
    Paragraph(String),
    Form(StockFormView),
    Json(serde_json::Value),
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Screen {
    mode: ScreenMode,
    login_error: Option<String>,
    blocks: Vec<Block>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Switch to the login view. Main content is hidden, not cleared.
    pub fn show_login(&mut self, error: Option<String>) {
        self.mode = ScreenMode::Login;
        self.login_error = error;
    }

    pub fn show_main(&mut self) {
        self.mode = ScreenMode::Main;
        self.login_error = None;
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.push(Block::Title(text.into()));
    }

    pub fn notify(&mut self, notice: Notification) {
        self.push(Block::Notice(notice));
    }

    pub fn paragraph(&mut self, text: impl Into<String>) {
        self.push(Block::Paragraph(text.into()));
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notification> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Notice(n) => Some(n),
            Block::Form(form) => form.notice.as_ref(),
            _ => None,
        })
    }

    pub fn has_errors(&self) -> bool {
        self.login_error.is_some() || self.notices().any(Notification::is_error)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn form(&self) -> Option<&StockFormView> {
        self.blocks.iter().find_map(|b| match b {
            Block::Form(f) => Some(f),
            _ => None,
        })
    }

    pub fn form_mut(&mut self) -> Option<&mut StockFormView> {
        self.blocks.iter_mut().find_map(|b| match b {
            Block::Form(f) => Some(f),
            _ => None,
        })
    }

    /// Render as terminal text, optionally with ANSI colors.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();

        if self.mode == ScreenMode::Login {
            push_line(&mut out, &heading("Login", color));
            if let Some(err) = &self.login_error {
                push_line(&mut out, &notice_line(&Notification::error(err.clone()), color));
            }
            return out;
        }

        for block in &self.blocks {
            match block {
                Block::Title(t) => push_line(&mut out, &heading(t, color)),
                Block::Table(t) => out.push_str(&t.to_string()),
                Block::Notice(n) => push_line(&mut out, &notice_line(n, color)),
                Block::Paragraph(p) => push_line(&mut out, p),
                Block::Form(form) => {
                    out.push_str(&form.to_string());
                    if let Some(n) = &form.notice {
                        push_line(&mut out, &notice_line(n, color));
                    }
                }
                Block::Json(v) => {
                    let pretty = serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string());
                    push_line(&mut out, &pretty);
                }
            }
        }
        out
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn heading(text: &str, color: bool) -> String {
    if color {
        format!("== {} ==", text.bold())
    } else {
        format!("== {text} ==")
    }
}

fn notice_line(n: &Notification, color: bool) -> String {
    match (n.level, color) {
        (NoticeLevel::Error, true) => format!("{} {}", "[error]".red().bold(), n.text.red()),
        (NoticeLevel::Error, false) => format!("[error] {}", n.text),
        (NoticeLevel::Info, true) => format!("{} {}", "[info]".cyan(), n.text),
        (NoticeLevel::Info, false) => format!("[info] {}", n.text),
    }
}
