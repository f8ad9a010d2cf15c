//! Application constants

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "unlock_api=info,tower_http=info";

/// Success sentinel reported by every upstream in its top-level `code`
pub const UPSTREAM_SUCCESS_CODE: f64 = 200.0;

// Envelope codes
pub const CODE_OK: u16 = 200;
pub const CODE_BAD_REQUEST: u16 = 400;
pub const CODE_METHOD_NOT_ALLOWED: u16 = 405;
pub const CODE_SERVER_ERROR: u16 = 500;

// User-facing messages. These are part of the API contract with the web page.
pub const MSG_MISSING_URL: &str = "请输入链接";
pub const MSG_UNSUPPORTED_PLATFORM: &str = "不支持的平台或链接格式不正确";
pub const MSG_UPSTREAM_REJECTED: &str = "解析失败，请检查链接是否正确";
pub const MSG_ENDPOINT_NOT_CONFIGURED: &str = "该平台解析接口未配置";
pub const MSG_SERVER_ERROR: &str = "服务器错误";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Request headers the browser page may send cross-origin
pub const CORS_ALLOWED_HEADERS: [&str; 9] = [
    "x-csrf-token",
    "x-requested-with",
    "accept",
    "accept-version",
    "content-length",
    "content-md5",
    "content-type",
    "date",
    "x-api-version",
];
