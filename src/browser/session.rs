use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::browser::error::PageError;
use crate::browser::page::FormPage;
use crate::field::field_model::{ChoiceOption, FieldDescriptor, FieldKind, FillValue};

pub const DEFAULT_SERVER_SCRIPT: &str = "node/form-server/form_server.js";

/// Hints the form server uses to locate a field in the live DOM.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // radio group name
    pub label: String,
    pub kind: FieldKind,
}

impl From<&FieldDescriptor> for FieldSelector {
    fn from(field: &FieldDescriptor) -> Self {
        FieldSelector {
            id: field.dom_id.clone(),
            name: field.group.clone(),
            label: field.label.clone(),
            kind: field.kind,
        }
    }
}

/// Request sent to the form server over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BrowserRequest {
    Navigate { url: String },
    ExtractFields,
    ApplyValue { field: FieldSelector, value: FillValue },
    SelectOption { field: FieldSelector, index: usize },
    ChoiceOptions { field: FieldSelector },
    Wait { duration_ms: u64 },
    PageInfo,
    Quit,
}

impl BrowserRequest {
    fn name(&self) -> &'static str {
        match self {
            BrowserRequest::Navigate { .. } => "navigate",
            BrowserRequest::ExtractFields => "extract_fields",
            BrowserRequest::ApplyValue { .. } => "apply_value",
            BrowserRequest::SelectOption { .. } => "select_option",
            BrowserRequest::ChoiceOptions { .. } => "choice_options",
            BrowserRequest::Wait { .. } => "wait",
            BrowserRequest::PageInfo => "page_info",
            BrowserRequest::Quit => "quit",
        }
    }
}

/// Response received from the form server over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub stale: Option<bool>,
    #[serde(default)]
    pub data: Option<Vec<FieldDescriptor>>,
    #[serde(default)]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
}

/// URL and title of the page currently loaded.
#[derive(Debug, Clone)]
pub struct PageInfo {
    pub url: String,
    pub title: String,
}

/// A persistent browser session backed by a Node.js form server.
///
/// The server keeps one Chromium page open and owns all DOM heuristics
/// (label association, visibility, cookie banners). Commands are sent as
/// NDJSON over stdin and answered one line each on stdout, so at most one
/// interaction is ever outstanding.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    settle_ms: u64,
    closed: bool,
}

impl BrowserSession {
    /// Spawn the form server and wait for its ready line.
    pub fn launch(script: &str, settle_ms: u64) -> Result<Self, PageError> {
        let mut child = Command::new("node")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| PageError::SubprocessSpawn {
                script: script.into(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PageError::SessionIO(format!("Failed to capture stdin of {}", script)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PageError::SessionIO(format!("Failed to capture stdout of {}", script)))?;

        let mut reader = BufReader::new(stdout);

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| PageError::SessionIO(format!("Failed to read ready signal: {}", e)))?;

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| PageError::JsonParse {
                context: "form server ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(PageError::Protocol {
                command: "launch".into(),
                error: "Did not receive ready signal from form server".into(),
            });
        }

        debug!(script, "form server ready");

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            settle_ms,
            closed: false,
        })
    }

    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, PageError> {
        if self.closed {
            return Err(PageError::Closed("session already quit".into()));
        }

        let json = serde_json::to_string(request).map_err(|e| PageError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| PageError::SessionIO(format!("Failed to write to form server: {}", e)))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| PageError::SessionIO(format!("Failed to read from form server: {}", e)))?;

        if line.trim().is_empty() {
            return Err(PageError::Closed(
                "empty response from form server (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| PageError::JsonParse {
            context: format!("{} response", request.name()),
            source: e,
        })
    }

    /// Send a request and verify it succeeded.
    fn send_ok(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, PageError> {
        let response = self.send(request)?;
        if response.ok {
            return Ok(response);
        }

        let error = response.error.unwrap_or_else(|| "Unknown error".into());
        match (request, response.stale) {
            (
                BrowserRequest::ApplyValue { field, .. }
                | BrowserRequest::SelectOption { field, .. }
                | BrowserRequest::ChoiceOptions { field },
                Some(true),
            ) => Err(PageError::StaleField {
                field: field.label.clone(),
                reason: error,
            }),
            _ => Err(PageError::Protocol {
                command: request.name().into(),
                error,
            }),
        }
    }

    pub fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        self.send_ok(&BrowserRequest::Navigate { url: url.into() })?;
        Ok(())
    }

    /// Give the page's reactive logic time to settle.
    pub fn wait_idle(&mut self, ms: u64) -> Result<(), PageError> {
        if ms == 0 {
            return Ok(());
        }
        self.send_ok(&BrowserRequest::Wait { duration_ms: ms })?;
        Ok(())
    }

    pub fn page_info(&mut self) -> Result<PageInfo, PageError> {
        let response = self.send_ok(&BrowserRequest::PageInfo)?;
        Ok(PageInfo {
            url: response.url.unwrap_or_default(),
            title: response.title.unwrap_or_default(),
        })
    }

    /// Quit the browser session.
    pub fn quit(&mut self) -> Result<(), PageError> {
        if self.closed {
            return Ok(());
        }
        // Best-effort: the process may already be gone
        if let Err(e) = self.send(&BrowserRequest::Quit) {
            warn!(error = %e, "form server did not acknowledge quit");
        }
        self.closed = true;
        let _ = self.child.wait();
        Ok(())
    }
}

impl FormPage for BrowserSession {
    fn extract_visible_fields(&mut self) -> Result<Vec<FieldDescriptor>, PageError> {
        let response = self.send_ok(&BrowserRequest::ExtractFields)?;
        response.data.ok_or_else(|| PageError::Protocol {
            command: "extract_fields".into(),
            error: "No data in extract_fields response".into(),
        })
    }

    fn apply_value(&mut self, field: &FieldDescriptor, value: &FillValue) -> Result<(), PageError> {
        self.send_ok(&BrowserRequest::ApplyValue {
            field: field.into(),
            value: value.clone(),
        })?;
        self.wait_idle(self.settle_ms)
    }

    fn select_option(&mut self, field: &FieldDescriptor, index: usize) -> Result<(), PageError> {
        self.send_ok(&BrowserRequest::SelectOption {
            field: field.into(),
            index,
        })?;
        self.wait_idle(self.settle_ms)
    }

    fn choice_options(&mut self, field: &FieldDescriptor) -> Result<Vec<ChoiceOption>, PageError> {
        if field.kind != FieldKind::Radio {
            return Ok(field.choice_options.clone());
        }
        let response = self.send_ok(&BrowserRequest::ChoiceOptions { field: field.into() })?;
        Ok(response.options.unwrap_or_default())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
