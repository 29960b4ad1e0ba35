//! Shared types for taint analysis: labels, sources, sinks, sanitizers,
//! and the flows that connect them.

/// Where tainted data originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    UserInput,
    HttpRequest,
    QueryParam,
    FormData,
    FileRead,
    EnvironmentVariable,
    DatabaseRead,
    NetworkResponse,
}

impl SourceType {
    pub fn name(&self) -> &'static str {
        match self {
            SourceType::UserInput => "user_input",
            SourceType::HttpRequest => "http_request",
            SourceType::QueryParam => "query_param",
            SourceType::FormData => "form_data",
            SourceType::FileRead => "file_read",
            SourceType::EnvironmentVariable => "environment_variable",
            SourceType::DatabaseRead => "database_read",
            SourceType::NetworkResponse => "network_response",
        }
    }
}

/// Where tainted data is dangerous to reach untransformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkType {
    SqlQuery,
    ShellCommand,
    HtmlOutput,
    FileWrite,
    FilePath,
    LogOutput,
    HttpRedirect,
    Deserialization,
    TemplateEngine,
    XmlParser,
    Eval,
}

impl SinkType {
    pub fn name(&self) -> &'static str {
        match self {
            SinkType::SqlQuery => "sql_query",
            SinkType::ShellCommand => "shell_command",
            SinkType::HtmlOutput => "html_output",
            SinkType::FileWrite => "file_write",
            SinkType::FilePath => "file_path",
            SinkType::LogOutput => "log_output",
            SinkType::HttpRedirect => "http_redirect",
            SinkType::Deserialization => "deserialization",
            SinkType::TemplateEngine => "template_engine",
            SinkType::XmlParser => "xml_parser",
            SinkType::Eval => "eval",
        }
    }

    /// The CWE most commonly associated with this sink, used when a
    /// specific finding doesn't supply one explicitly.
    pub fn default_cwe(&self) -> u32 {
        match self {
            SinkType::SqlQuery => 89,
            SinkType::ShellCommand => 78,
            SinkType::HtmlOutput => 79,
            SinkType::FileWrite | SinkType::FilePath => 22,
            SinkType::LogOutput => 117,
            SinkType::HttpRedirect => 601,
            SinkType::Deserialization => 502,
            SinkType::TemplateEngine => 1336,
            SinkType::XmlParser => 611,
            SinkType::Eval => 94,
        }
    }
}

/// A transformation applied to tainted data that may neutralize it for
/// some (not necessarily all) sink types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SanitizerType {
    HtmlEscape,
    SqlParameterize,
    ShellEscape,
    PathNormalize,
    Allowlist,
    SchemaValidate,
    UrlEncode,
}

impl SanitizerType {
    pub fn name(&self) -> &'static str {
        match self {
            SanitizerType::HtmlEscape => "html_escape",
            SanitizerType::SqlParameterize => "sql_parameterize",
            SanitizerType::ShellEscape => "shell_escape",
            SanitizerType::PathNormalize => "path_normalize",
            SanitizerType::Allowlist => "allowlist",
            SanitizerType::SchemaValidate => "schema_validate",
            SanitizerType::UrlEncode => "url_encode",
        }
    }

    /// Sink types this sanitizer is actually effective against.
    pub fn neutralizes(&self) -> &'static [SinkType] {
        match self {
            SanitizerType::HtmlEscape => &[SinkType::HtmlOutput, SinkType::TemplateEngine],
            SanitizerType::SqlParameterize => &[SinkType::SqlQuery],
            SanitizerType::ShellEscape => &[SinkType::ShellCommand],
            SanitizerType::PathNormalize => &[SinkType::FilePath, SinkType::FileWrite],
            SanitizerType::Allowlist => &[
                SinkType::HtmlOutput,
                SinkType::SqlQuery,
                SinkType::ShellCommand,
                SinkType::FilePath,
            ],
            SanitizerType::SchemaValidate => &[SinkType::Deserialization],
            SanitizerType::UrlEncode => &[SinkType::HttpRedirect],
        }
    }
}

/// A taint label attached to a variable as it's tracked through a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaintLabel {
    pub id: u64,
    pub source_type: SourceType,
    pub applied_sanitizers: Vec<SanitizerType>,
    /// True once enough sanitizers have been applied to neutralize the
    /// label for every sink type that matters to the caller.
    pub sanitized: bool,
}

impl TaintLabel {
    pub fn new(id: u64, source_type: SourceType) -> Self {
        Self {
            id,
            source_type,
            applied_sanitizers: Vec::new(),
            sanitized: false,
        }
    }

    pub fn has_sanitizer(&self, sanitizer: SanitizerType) -> bool {
        self.applied_sanitizers.contains(&sanitizer)
    }

    pub fn apply_sanitizer(&mut self, sanitizer: SanitizerType) {
        if !self.has_sanitizer(sanitizer) {
            self.applied_sanitizers.push(sanitizer);
        }
    }

    /// Whether this label is safe to reach the given sink type.
    pub fn is_safe_for(&self, sink: SinkType) -> bool {
        self.applied_sanitizers.iter().any(|s| s.neutralizes().contains(&sink))
    }
}

/// A sanitizer call site recorded during propagation.
#[derive(Debug, Clone)]
pub struct TaintSanitizer {
    pub file: String,
    pub line: u32,
    pub expression: String,
    pub sanitizer_type: SanitizerType,
    pub labels_sanitized: Vec<SinkType>,
}

/// A point in source where tainted data enters the program.
#[derive(Debug, Clone)]
pub struct TaintSource {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub expression: String,
    pub source_type: SourceType,
}

/// A point in source where tainted data would be dangerous.
#[derive(Debug, Clone)]
pub struct TaintSink {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub expression: String,
    pub sink_type: SinkType,
}

/// An intermediate hop in a source-to-sink flow.
#[derive(Debug, Clone)]
pub struct TaintHop {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub description: String,
}

/// A complete, confirmed or possible, flow from a source to a sink.
#[derive(Debug, Clone)]
pub struct TaintFlow {
    pub source: TaintSource,
    pub sink: TaintSink,
    pub path: Vec<TaintHop>,
    pub is_sanitized: bool,
    pub cwe_id: Option<u32>,
}
