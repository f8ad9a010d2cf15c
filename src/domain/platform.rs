//! Supported source platforms and URL detection

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// A social-media site with a configured unlocking upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Douyin,
    Xiaohongshu,
    Bilibili,
    Weibo,
    Pipix,
    Qishui,
}

/// Compiled detection patterns, in detection order.
static PATTERNS: LazyLock<Vec<(Platform, Regex)>> = LazyLock::new(|| {
    Platform::ALL
        .into_iter()
        .map(|platform| {
            let re = Regex::new(platform.pattern_source())
                .unwrap_or_else(|e| panic!("invalid pattern for {}: {}", platform, e));
            (platform, re)
        })
        .collect()
});

impl Platform {
    /// Detection order. Patterns cover disjoint domains, but if two ever
    /// overlap the earlier entry wins.
    pub const ALL: [Platform; 6] = [
        Platform::Douyin,
        Platform::Xiaohongshu,
        Platform::Bilibili,
        Platform::Weibo,
        Platform::Pipix,
        Platform::Qishui,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Douyin => "douyin",
            Platform::Xiaohongshu => "xiaohongshu",
            Platform::Bilibili => "bilibili",
            Platform::Weibo => "weibo",
            Platform::Pipix => "pipix",
            Platform::Qishui => "qishui",
        }
    }

    /// Unanchored regex searched anywhere in the submitted text, so share
    /// text with a link embedded in it still matches.
    fn pattern_source(self) -> &'static str {
        match self {
            Platform::Douyin => r"douyin\.com|iesdouyin\.com",
            Platform::Xiaohongshu => r"xiaohongshu\.com|xhslink\.com",
            Platform::Bilibili => r"bilibili\.com",
            Platform::Weibo => r"weibo\.com",
            Platform::Pipix => r"pipix\.com|h5\.pipix\.com",
            Platform::Qishui => r"qishui\.com",
        }
    }

    /// Environment variable that overrides this platform's upstream endpoint
    pub fn endpoint_env_var(self) -> &'static str {
        match self {
            Platform::Douyin => "DOUYIN_API_URL",
            Platform::Xiaohongshu => "XIAOHONGSHU_API_URL",
            Platform::Bilibili => "BILIBILI_API_URL",
            Platform::Weibo => "WEIBO_API_URL",
            Platform::Pipix => "PIPIX_API_URL",
            Platform::Qishui => "QISHUI_API_URL",
        }
    }

    /// Upstream used when the environment does not override it
    pub fn default_endpoint(self) -> &'static str {
        match self {
            Platform::Douyin => "https://jx.16.do/api/douyin.php",
            Platform::Xiaohongshu => "https://jx.16.do/api/xhsjx.php",
            Platform::Bilibili => "https://jx.16.do/api/bilibili.php",
            Platform::Weibo => "https://jx.16.do/api/weibo.php",
            Platform::Pipix => "https://jx.16.do/api/ppxia.php",
            Platform::Qishui => "https://jx.16.do/api/qsmusic.php",
        }
    }

    /// Returns the first platform whose pattern matches `url`.
    pub fn detect(url: &str) -> Option<Platform> {
        PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(url))
            .map(|(platform, _)| *platform)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
