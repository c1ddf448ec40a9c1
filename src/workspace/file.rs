//! File records and the language tags that drive highlighting and running

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a file record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        FileId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it is one (timestamp ids and seed ids are)
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        FileId(id.to_string())
    }
}

/// Selects the highlighting rules (and run behavior) for a file
///
/// Serialized with the tags the persisted store has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "javascript")]
    Script,
    #[serde(rename = "markup")]
    Markup,
    #[serde(rename = "css")]
    Stylesheet,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "json")]
    Data,
}

impl Language {
    /// Infer the language from a file name's extension.
    ///
    /// Unknown or missing extensions default to [`Language::Script`].
    pub fn from_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or(name);
        match ext {
            "js" => Language::Script,
            "html" => Language::Markup,
            "css" => Language::Stylesheet,
            "md" => Language::Markdown,
            "py" => Language::Python,
            "json" => Language::Data,
            _ => Language::Script,
        }
    }

    /// The persisted tag (`javascript`, `markup`, ...)
    pub fn tag(self) -> &'static str {
        match self {
            Language::Script => "javascript",
            Language::Markup => "markup",
            Language::Stylesheet => "css",
            Language::Markdown => "markdown",
            Language::Python => "python",
            Language::Data => "json",
        }
    }

    /// Label for the status bar
    pub fn display_name(self) -> String {
        self.tag().to_uppercase()
    }

    /// File extension the highlighter uses to pick a grammar
    pub fn extension(self) -> &'static str {
        match self {
            Language::Script => "js",
            Language::Markup => "html",
            Language::Stylesheet => "css",
            Language::Markdown => "md",
            Language::Python => "py",
            Language::Data => "json",
        }
    }

    /// Whether the run action executes this language in the script host
    pub fn is_executable(self) -> bool {
        matches!(self, Language::Script)
    }
}

/// Glyph shown next to a file name in the explorer and tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIcon {
    Script,
    Code,
    Palette,
    Generic,
}

impl FileIcon {
    pub fn for_name(name: &str) -> Self {
        if name.ends_with(".js") {
            FileIcon::Script
        } else if name.ends_with(".html") {
            FileIcon::Code
        } else if name.ends_with(".css") {
            FileIcon::Palette
        } else {
            FileIcon::Generic
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            FileIcon::Script => "{}",
            FileIcon::Code => "<>",
            FileIcon::Palette => "#",
            FileIcon::Generic => "≡",
        }
    }
}

/// An in-memory named text buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
    pub content: String,
    #[serde(rename = "lang")]
    pub language: Language,
}

impl FileRecord {
    pub fn new(id: FileId, name: impl Into<String>) -> Self {
        let name = name.into();
        FileRecord {
            id,
            language: Language::from_name(&name),
            name,
            content: String::new(),
        }
    }

    pub fn icon(&self) -> FileIcon {
        FileIcon::for_name(&self.name)
    }
}

const DEFAULT_HTML: &str = "<!DOCTYPE html>\n<html>\n<head>\n  <title>YallStudioCode App</title>\n  <link rel=\"stylesheet\" href=\"styles.css\">\n</head>\n<body>\n  <div id=\"app\">\n    <h1>YSCode Live</h1>\n    <p>Try editing this text!</p>\n    <button onclick=\"handleClick()\">Click Me</button>\n  </div>\n  <script src=\"index.js\"></script>\n</body>\n</html>";

const DEFAULT_JS: &str = "function handleClick() {\n  console.log(\"Button clicked!\");\n  alert(\"YSCode is functional!\");\n}\n\nconsole.log(\"App loaded successfully.\");";

const DEFAULT_CSS: &str = "body {\n  background: #0f172a;\n  color: white;\n  font-family: sans-serif;\n  display: flex;\n  justify-content: center;\n  align-items: center;\n  height: 100vh;\n  margin: 0;\n}\n#app {\n  text-align: center;\n  padding: 2rem;\n  border: 1px solid #334155;\n  border-radius: 1rem;\n  background: #1e293b;\n}";

/// The three starter files used when nothing has been persisted yet
pub fn default_files() -> Vec<FileRecord> {
    vec![
        FileRecord {
            id: FileId::from("1"),
            name: "index.html".to_string(),
            content: DEFAULT_HTML.to_string(),
            language: Language::Markup,
        },
        FileRecord {
            id: FileId::from("2"),
            name: "index.js".to_string(),
            content: DEFAULT_JS.to_string(),
            language: Language::Script,
        },
        FileRecord {
            id: FileId::from("3"),
            name: "styles.css".to_string(),
            content: DEFAULT_CSS.to_string(),
            language: Language::Stylesheet,
        },
    ]
}
