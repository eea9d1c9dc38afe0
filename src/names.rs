pub const QUIZZES_URL: &str = "/api/quizzes";
pub const QUIZ_URL: &str = "/api/quizzes/{id}";
pub const UPLOAD_URL: &str = "/api/upload";
pub const HEALTH_URL: &str = "/health";

pub fn quiz_url(id: &str) -> String {
    format!("{QUIZZES_URL}/{id}")
}

pub const SERVICE_NAME: &str = "Teacher Quiz Tool API";
pub const FEATURES: &[&str] = &[
    "libSQL",
    "Multiple Question Types",
    "Image Support",
    "Document Upload",
];

// Document upload
pub const UPLOAD_FIELD_NAME: &str = "file";
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DOCUMENT_EXTENSIONS: &[&str] = &["doc", "docx"];

// Defaults
pub const DEFAULT_DATABASE_URL: &str = "file:quizdesk.db";
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://boukmn-byte.github.io",
    "http://localhost:8000",
    "http://127.0.0.1:8000",
];
