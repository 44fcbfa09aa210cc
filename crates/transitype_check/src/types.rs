/// How a check run ended. All variants are a normal exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Discovery and prompts produced nothing to trace
    NoFiles,
    /// The compiler reported type errors for `files`
    TypeErrors { files: Vec<String> },
    Checked {
        flagged: Vec<String>,
        /// Number of files the compiler loaded
        files_listed: usize,
    },
}
